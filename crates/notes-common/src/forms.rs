//! Login / register form logic.
//!
//! One form serves both modes. Login persists the returned token pair and
//! goes home; register only sends the user to the login page.

use crate::api::{ApiClient, endpoints};
use crate::models::{Credentials, TokenPair};
use crate::routes::Route;
use crate::session::SessionRepository;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Login,
    Register,
}

impl FormMode {
    /// Heading and idle submit label.
    pub fn title(self) -> &'static str {
        match self {
            FormMode::Login => "Login",
            FormMode::Register => "Register",
        }
    }

    pub fn submit_label(self, busy: bool) -> &'static str {
        if busy { "Loading..." } else { self.title() }
    }

    /// Endpoint the form posts to.
    pub fn endpoint(self) -> &'static str {
        match self {
            FormMode::Login => endpoints::TOKEN,
            FormMode::Register => endpoints::REGISTER,
        }
    }

    /// The other form, for the "switch" link under the submit button.
    pub fn alternate(self) -> (Route, &'static str) {
        match self {
            FormMode::Login => (Route::Register, "Need an account? Register"),
            FormMode::Register => (Route::Login, "Already have an account? Login"),
        }
    }
}

/// What the view should do once a submission settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Navigate(Route),
    /// Show this message inline.
    Error(String),
    /// 2xx other than 200/201: nothing to do.
    Idle,
}

/// Submit credentials to `endpoint` in the given mode.
///
/// Empty fields are rejected before any request is made.
pub async fn submit_credentials<T, S>(
    api: &ApiClient<T, S>,
    endpoint: &str,
    mode: FormMode,
    credentials: &Credentials,
) -> FormOutcome
where
    T: Transport,
    S: SessionRepository,
{
    if let Err(msg) = credentials.validate() {
        return FormOutcome::Error(msg.to_string());
    }

    let response = match api.post(endpoint, credentials).await {
        Ok(resp) => resp,
        Err(e) => {
            log::warn!("{} failed: {e}", mode.title());
            return FormOutcome::Error(e.user_message());
        }
    };

    if response.status != 200 && response.status != 201 {
        log::warn!("{} returned unexpected status {}", mode.title(), response.status);
        return FormOutcome::Idle;
    }

    match mode {
        FormMode::Register => FormOutcome::Navigate(Route::Login),
        FormMode::Login => {
            let pair = match response.json::<TokenPair>() {
                Ok(pair) => pair,
                Err(e) => return FormOutcome::Error(e.user_message()),
            };
            if let Err(e) = api.session().store_login(&pair.access, &pair.refresh) {
                log::error!("Failed to persist tokens: {e}");
                return FormOutcome::Error(format!("Could not save session: {e}"));
            }
            log::info!("Logged in as {}", credentials.username);
            FormOutcome::Navigate(Route::Home)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::session::{InMemorySession, TokenKind};
    use crate::transport::ScriptedTransport;
    use serde_json::json;

    fn api() -> ApiClient<ScriptedTransport, InMemorySession> {
        ApiClient::new(
            ClientConfig::new("http://api.test"),
            ScriptedTransport::new(),
            InMemorySession::new(),
        )
    }

    #[tokio::test]
    async fn login_persists_exactly_the_returned_pair() {
        let api = api();
        api.transport()
            .respond(200, json!({"access": "acc-1", "refresh": "ref-1"}));

        let outcome = submit_credentials(
            &api,
            FormMode::Login.endpoint(),
            FormMode::Login,
            &Credentials::new("alice", "pw"),
        )
        .await;

        assert_eq!(outcome, FormOutcome::Navigate(Route::Home));
        assert_eq!(api.session().get(TokenKind::Access).as_deref(), Some("acc-1"));
        assert_eq!(api.session().get(TokenKind::Refresh).as_deref(), Some("ref-1"));
        assert_eq!(api.session().len(), 2);

        let req = api.transport().last_request().unwrap();
        assert_eq!(req.url, "http://api.test/api/token/");
        assert_eq!(req.body, Some(json!({"username": "alice", "password": "pw"})));
    }

    #[tokio::test]
    async fn register_never_persists_tokens() {
        let api = api();
        // Even if the server hands tokens back, registration does not log in.
        api.transport()
            .respond(201, json!({"id": 1, "username": "bob", "access": "x", "refresh": "y"}));

        let outcome = submit_credentials(
            &api,
            FormMode::Register.endpoint(),
            FormMode::Register,
            &Credentials::new("bob", "pw"),
        )
        .await;

        assert_eq!(outcome, FormOutcome::Navigate(Route::Login));
        assert!(api.session().is_empty());
        assert_eq!(
            api.transport().last_request().unwrap().url,
            "http://api.test/api/user/register/"
        );
    }

    #[tokio::test]
    async fn server_detail_is_shown_inline() {
        let api = api();
        api.transport().respond(
            401,
            json!({"detail": "No active account found with the given credentials"}),
        );

        let outcome = submit_credentials(
            &api,
            endpoints::TOKEN,
            FormMode::Login,
            &Credentials::new("alice", "wrong"),
        )
        .await;

        assert_eq!(
            outcome,
            FormOutcome::Error("No active account found with the given credentials".into())
        );
        assert!(api.session().is_empty());
    }

    #[tokio::test]
    async fn network_failure_reports_generic_message() {
        let api = api();
        api.transport().fail("connection refused");

        let outcome = submit_credentials(
            &api,
            endpoints::TOKEN,
            FormMode::Login,
            &Credentials::new("alice", "pw"),
        )
        .await;

        assert_eq!(outcome, FormOutcome::Error("Network Error".into()));
    }

    #[tokio::test]
    async fn empty_fields_rejected_without_request() {
        let api = api();
        let outcome = submit_credentials(
            &api,
            endpoints::TOKEN,
            FormMode::Login,
            &Credentials::new("", "pw"),
        )
        .await;

        assert!(matches!(outcome, FormOutcome::Error(_)));
        assert_eq!(api.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn other_success_status_stays_on_form() {
        let api = api();
        api.transport().respond_empty(204);

        let outcome = submit_credentials(
            &api,
            endpoints::REGISTER,
            FormMode::Register,
            &Credentials::new("bob", "pw"),
        )
        .await;

        assert_eq!(outcome, FormOutcome::Idle);
    }

    #[test]
    fn labels_follow_mode_and_busy_flag() {
        assert_eq!(FormMode::Login.submit_label(false), "Login");
        assert_eq!(FormMode::Register.submit_label(false), "Register");
        assert_eq!(FormMode::Login.submit_label(true), "Loading...");
        assert_eq!(FormMode::Login.alternate().0, Route::Register);
    }
}

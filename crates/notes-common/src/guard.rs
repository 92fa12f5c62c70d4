//! Auth guard for protected views.
//!
//! Runs once per mount: `Unknown` resolves to `Authenticated` or
//! `Unauthenticated` and stays there until the view is mounted again.
//! Every failure path lands on `Unauthenticated`.

use chrono::Utc;

use crate::api::{ApiClient, endpoints};
use crate::models::{RefreshRequest, RefreshResponse};
use crate::session::{SessionRepository, TokenKind};
use crate::token;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Check still in flight; render a placeholder.
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// Source of "now" in seconds since the Unix epoch.
pub trait Clock {
    fn now_secs(&self) -> f64;
}

/// Wall clock (`Date.now()` in the browser via chrono's wasmbind).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        Utc::now().timestamp_millis() as f64 / 1000.0
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now_secs(&self) -> f64 {
        self.0
    }
}

/// Decide whether the stored session may see protected content, refreshing
/// an expired access token when a refresh token is available.
pub async fn check_session<T, S, C>(api: &ApiClient<T, S>, clock: &C) -> AuthState
where
    T: Transport,
    S: SessionRepository,
    C: Clock,
{
    let Some(access) = api.session().get(TokenKind::Access) else {
        log::debug!("No access token stored");
        return AuthState::Unauthenticated;
    };

    let claims = match token::decode_claims(&access) {
        Ok(claims) => claims,
        Err(e) => {
            log::error!("Token decode error: {e}");
            return AuthState::Unauthenticated;
        }
    };

    match claims.is_expired_at(clock.now_secs()) {
        Ok(false) => AuthState::Authenticated,
        Ok(true) => {
            log::debug!("Access token expired, attempting refresh");
            if refresh_access_token(api).await {
                AuthState::Authenticated
            } else {
                AuthState::Unauthenticated
            }
        }
        Err(e) => {
            log::error!("Token decode error: {e}");
            AuthState::Unauthenticated
        }
    }
}

/// Exchange the stored refresh token for a new access token and persist it.
/// Returns `false` on any failure; the cause is logged.
pub async fn refresh_access_token<T, S>(api: &ApiClient<T, S>) -> bool
where
    T: Transport,
    S: SessionRepository,
{
    let Some(refresh) = api.session().get(TokenKind::Refresh) else {
        log::debug!("No refresh token stored");
        return false;
    };

    let response = match api
        .post(endpoints::TOKEN_REFRESH, &RefreshRequest { refresh })
        .await
        .and_then(|resp| resp.json::<RefreshResponse>())
    {
        Ok(resp) => resp,
        Err(e) => {
            log::error!("Failed to refresh token: {e}");
            return false;
        }
    };

    if let Err(e) = api.session().set(TokenKind::Access, &response.access) {
        log::error!("Failed to store refreshed token: {e}");
        return false;
    }

    log::info!("Access token refreshed");
    true
}

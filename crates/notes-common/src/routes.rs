//! Route table.

use std::fmt;

use crate::session::SessionRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Notes list, behind the auth guard.
    Home,
    Login,
    Register,
    /// Clears client state and redirects to `Login`.
    Logout,
    NotFound,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Logout => "/logout",
            Route::NotFound => "*",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Clear every piece of persisted client state and return where to go next.
pub fn logout<S: SessionRepository>(session: &S) -> Route {
    session.clear();
    log::info!("Logged out, persisted state cleared");
    Route::Login
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{InMemorySession, TokenKind};

    #[test]
    fn paths_match_router_table() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(Route::Login.path(), "/login");
        assert_eq!(Route::Register.path(), "/register");
        assert_eq!(Route::Logout.to_string(), "/logout");
    }

    #[test]
    fn logout_clears_all_state_and_goes_to_login() {
        let session = InMemorySession::with_tokens("a", "r");
        session.insert_raw("draft", "x");

        assert_eq!(logout(&session), Route::Login);
        assert!(session.is_empty());
        assert_eq!(session.get(TokenKind::Access), None);
    }
}

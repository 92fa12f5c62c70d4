//! `localStorage`-backed token store.
//!
//! Tokens are stored as raw strings under the `access` and `refresh` keys
//! (not JSON-encoded), so they stay readable by anything else on the origin.

use gloo_storage::{LocalStorage, Storage};

use notes_common::session::{Result, SessionError, SessionRepository, TokenKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageSession;

impl SessionRepository for LocalStorageSession {
    fn get(&self, kind: TokenKind) -> Option<String> {
        LocalStorage::raw().get_item(kind.key()).ok().flatten()
    }

    fn set(&self, kind: TokenKind, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(kind.key(), value)
            .map_err(|e| SessionError::Write {
                key: kind.key(),
                reason: format!("{e:?}"),
            })
    }

    /// Clears the whole of `localStorage` for this origin, not only the
    /// token keys.
    fn clear(&self) {
        LocalStorage::clear();
    }
}

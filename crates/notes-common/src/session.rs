//! Token store.
//!
//! The access and refresh tokens live in persistent client-side storage.
//! Every component reads and writes them through [`SessionRepository`] so the
//! browser's `localStorage` can be swapped for [`InMemorySession`] in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

/// Storage key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "access";
/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write {key}: {reason}")]
    Write { key: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// The two credentials kept between page loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    /// Fixed storage key for this token.
    pub fn key(self) -> &'static str {
        match self {
            TokenKind::Access => ACCESS_TOKEN_KEY,
            TokenKind::Refresh => REFRESH_TOKEN_KEY,
        }
    }
}

/// Snapshot of the persisted tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access: Option<String>,
    pub refresh: Option<String>,
}

impl Session {
    pub fn is_empty(&self) -> bool {
        self.access.is_none() && self.refresh.is_none()
    }
}

/// Get/set/clear over persistent token storage.
///
/// Implementations do no validation. `clear` wipes whatever the backing store
/// considers "all client state"; for the browser that is the whole of
/// `localStorage`, not just the two token keys.
pub trait SessionRepository {
    fn get(&self, kind: TokenKind) -> Option<String>;

    fn set(&self, kind: TokenKind, value: &str) -> Result<()>;

    fn clear(&self);

    fn snapshot(&self) -> Session {
        Session {
            access: self.get(TokenKind::Access),
            refresh: self.get(TokenKind::Refresh),
        }
    }

    /// Persist the pair returned by a successful login.
    fn store_login(&self, access: &str, refresh: &str) -> Result<()> {
        self.set(TokenKind::Access, access)?;
        self.set(TokenKind::Refresh, refresh)
    }
}

impl<S: SessionRepository + ?Sized> SessionRepository for &S {
    fn get(&self, kind: TokenKind) -> Option<String> {
        (**self).get(kind)
    }

    fn set(&self, kind: TokenKind, value: &str) -> Result<()> {
        (**self).set(kind, value)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

impl<S: SessionRepository + ?Sized> SessionRepository for Arc<S> {
    fn get(&self, kind: TokenKind) -> Option<String> {
        (**self).get(kind)
    }

    fn set(&self, kind: TokenKind, value: &str) -> Result<()> {
        (**self).set(kind, value)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// In-memory token store for tests.
///
/// Holds arbitrary keys so `clear` semantics ("everything goes") can be
/// observed alongside the two token keys.
#[derive(Debug, Default)]
pub struct InMemorySession {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed both tokens.
    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        let session = Self::new();
        session.insert_raw(ACCESS_TOKEN_KEY, access);
        session.insert_raw(REFRESH_TOKEN_KEY, refresh);
        session
    }

    /// Write an arbitrary key, bypassing the token contract.
    pub fn insert_raw(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
    }

    pub fn get_raw(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionRepository for InMemorySession {
    fn get(&self, kind: TokenKind) -> Option<String> {
        self.get_raw(kind.key())
    }

    fn set(&self, kind: TokenKind, value: &str) -> Result<()> {
        self.insert_raw(kind.key(), value);
        Ok(())
    }

    fn clear(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

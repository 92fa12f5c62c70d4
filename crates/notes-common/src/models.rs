//! Wire types for the auth and notes endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Auth ────────────────────────────────────────────────────────────

/// Body of `POST /api/token/` and `POST /api/user/register/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields are required; nothing else is checked client-side.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.is_empty() || self.password.is_empty() {
            Err("Username and password are required")
        } else {
            Ok(())
        }
    }
}

/// Response of `POST /api/token/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Body of `POST /api/token/refresh/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Response of `POST /api/token/refresh/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Structured error body (`{"detail": "..."}`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// The detail as display text. Non-string details are rendered as JSON.
    pub fn into_message(self) -> Option<String> {
        match self.detail? {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

// ── Notes ───────────────────────────────────────────────────────────

/// A note as returned by the server. Identity is the server-assigned `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Contents of the create form; also the body of `POST /api/notes/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.is_empty() || self.content.is_empty() {
            Err("Title and content are required")
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn note_parses_server_timestamp_with_offset() {
        let note: Note = serde_json::from_value(json!({
            "id": 7,
            "title": "T",
            "content": "C",
            "created_at": "2024-05-01T14:30:00.123456+02:00",
            "author": 1
        }))
        .unwrap();

        assert_eq!(note.id, 7);
        assert_eq!(
            note.created_at.timestamp(),
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn credentials_require_both_fields() {
        assert!(Credentials::new("u", "p").validate().is_ok());
        assert!(Credentials::new("", "p").validate().is_err());
        assert!(Credentials::new("u", "").validate().is_err());
    }

    #[test]
    fn draft_serializes_as_title_and_content() {
        let body = serde_json::to_value(NoteDraft::new("T", "C")).unwrap();
        assert_eq!(body, json!({"title": "T", "content": "C"}));
    }
}

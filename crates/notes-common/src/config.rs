//! Client configuration.
//!
//! The API base URL is fixed at build time (`NOTES_API_URL`), the same way a
//! bundler injects environment variables into a static SPA.

use serde::{Deserialize, Serialize};

/// Used when `NOTES_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address every API path is resolved against.
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
        }
    }

    /// Read the base URL baked in at compile time.
    pub fn from_build_env() -> Self {
        match option_env!("NOTES_API_URL") {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    /// Join an API path onto the base URL with exactly one slash between.
    pub fn url(&self, path: &str) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if base.is_empty() {
            format!("/{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_with_single_slash() {
        let cfg = ClientConfig::new("http://api.test/");
        assert_eq!(cfg.url("/api/notes/"), "http://api.test/api/notes/");
        assert_eq!(cfg.url("api/notes/"), "http://api.test/api/notes/");

        let cfg = ClientConfig::new("http://api.test");
        assert_eq!(cfg.url("/api/token/"), "http://api.test/api/token/");
    }

    #[test]
    fn empty_base_yields_same_origin_paths() {
        let cfg = ClientConfig::new("");
        assert_eq!(cfg.url("/api/notes/"), "/api/notes/");
    }

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(ClientConfig::default().api_base_url, DEFAULT_API_URL);
    }
}

//! HTTP transport abstraction.
//!
//! The API client builds [`HttpRequest`]s and hands them to a [`Transport`].
//! Implementations:
//! - `GlooTransport` (in notes-web) - browser fetch via gloo-net
//! - [`ScriptedTransport`] - canned responses for tests
//!
//! The trait uses `async fn` without `Send` bounds: the app runs on the
//! single-threaded browser event loop and gloo futures are `!Send`.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// No response was received (DNS, CORS, connection refused, aborted...).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("network error: {0}")]
pub struct TransportError(pub String);

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL (base already applied).
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set a header, replacing any existing value (case-insensitive name).
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Parsed JSON body; `Value::Null` for an empty body, `Value::String`
    /// when the body was not JSON.
    pub body: Value,
}

impl HttpResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn empty(status: u16) -> Self {
        Self::new(status, Value::Null)
    }

    /// Parse raw response text the way the transports receive it.
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };
        Self::new(status, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

/// Transport that replays queued responses in order and records every
/// request it was given.
///
/// When the queue runs dry, `send` fails with a [`TransportError`], which
/// callers observe exactly like a network failure.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a JSON body.
    pub fn respond(&self, status: u16, body: Value) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    /// Queue a response with no body.
    pub fn respond_empty(&self, status: u16) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(HttpResponse::empty(status)));
        self
    }

    /// Queue a network failure.
    pub fn fail(&self, message: &str) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(TransportError(message.to_string())));
        self
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.clone();
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError(format!("no scripted response for {url}"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_header_replaces_case_insensitively() {
        let mut req = HttpRequest::new(Method::Get, "http://x/");
        req.set_header("authorization", "Bearer a");
        req.set_header("Authorization", "Bearer b");
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.header("AUTHORIZATION"), Some("Bearer b"));
    }

    #[test]
    fn from_text_handles_empty_json_and_plain_bodies() {
        assert_eq!(HttpResponse::from_text(204, "").body, Value::Null);
        assert_eq!(
            HttpResponse::from_text(400, r#"{"detail":"bad"}"#).body,
            json!({"detail": "bad"})
        );
        assert_eq!(
            HttpResponse::from_text(502, "Bad Gateway").body,
            Value::String("Bad Gateway".into())
        );
    }

    #[test]
    fn success_range_is_2xx() {
        assert!(HttpResponse::empty(200).is_success());
        assert!(HttpResponse::empty(204).is_success());
        assert!(!HttpResponse::empty(199).is_success());
        assert!(!HttpResponse::empty(301).is_success());
        assert!(!HttpResponse::empty(401).is_success());
    }

    #[tokio::test]
    async fn scripted_transport_replays_in_order_and_records() {
        let transport = ScriptedTransport::new();
        transport.respond(200, json!([])).respond_empty(204);

        let first = transport
            .send(HttpRequest::new(Method::Get, "http://x/a"))
            .await
            .unwrap();
        let second = transport
            .send(HttpRequest::new(Method::Delete, "http://x/b"))
            .await
            .unwrap();
        let third = transport
            .send(HttpRequest::new(Method::Get, "http://x/c"))
            .await;

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 204);
        assert!(third.is_err());
        assert_eq!(transport.request_count(), 3);
        assert_eq!(transport.requests()[1].method, Method::Delete);
    }
}

//! API client for the notes backend.
//!
//! One [`ApiClient`] is shared by every view. Each request is passed through
//! [`ApiClient::intercept`], which reads the access token from the session
//! store at send time and attaches it as a Bearer header.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::models::ErrorBody;
use crate::session::{SessionRepository, TokenKind};
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

/// Endpoint paths, relative to the configured base URL.
pub mod endpoints {
    pub const TOKEN: &str = "/api/token/";
    pub const TOKEN_REFRESH: &str = "/api/token/refresh/";
    pub const REGISTER: &str = "/api/user/register/";
    pub const NOTES: &str = "/api/notes/";

    pub fn note(id: i64) -> String {
        format!("/api/notes/{id}/")
    }
}

/// Shown when no response was received.
pub const NETWORK_ERROR_MESSAGE: &str = "Network Error";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Non-2xx response. `detail` is taken from a `{"detail": "..."}` body.
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// A 2xx body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message for inline form errors.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Status { status, .. } => format!("Request failed with status {status}"),
            ApiError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ApiError::Decode(msg) => format!("Unexpected response from server: {msg}"),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// A successful (2xx) response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// Deserialize the body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_value(self.body.clone()).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Pull `detail` out of an error body, if it has one.
fn error_detail(body: &Value) -> Option<String> {
    if !body.is_object() {
        return None;
    }
    ErrorBody::deserialize(body)
        .ok()
        .and_then(ErrorBody::into_message)
}

/// Split a raw response into success or [`ApiError::Status`].
fn classify(resp: HttpResponse) -> ApiResult<ApiResponse> {
    if resp.is_success() {
        Ok(ApiResponse {
            status: resp.status,
            body: resp.body,
        })
    } else {
        Err(ApiError::Status {
            status: resp.status,
            detail: error_detail(&resp.body),
        })
    }
}

/// Shared HTTP client: base URL + bearer interceptor over a transport.
#[derive(Debug, Clone)]
pub struct ApiClient<T, S> {
    config: ClientConfig,
    transport: T,
    session: S,
}

impl<T: Transport, S: SessionRepository> ApiClient<T, S> {
    pub fn new(config: ClientConfig, transport: T, session: S) -> Self {
        Self {
            config,
            transport,
            session,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Attach `Authorization: Bearer <access>` from the current session.
    pub fn intercept(&self, mut request: HttpRequest) -> HttpRequest {
        if let Some(token) = self.session.get(TokenKind::Access) {
            request.set_header("Authorization", format!("Bearer {token}"));
        }
        request
    }

    /// Send a request to `path` and classify the outcome.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<ApiResponse> {
        let mut request = HttpRequest::new(method, self.config.url(path));
        if let Some(body) = body {
            request = request.with_body(body);
        }
        let request = self.intercept(request);

        log::debug!("{} {}", request.method, request.url);

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| ApiError::Network(e.0))?;

        log::debug!("{} {} -> {}", method, path, response.status);
        classify(response)
    }

    pub async fn get(&self, path: &str) -> ApiResult<ApiResponse> {
        self.send(Method::Get, path, None).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<ApiResponse> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(Method::Post, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<ApiResponse> {
        self.send(Method::Delete, path, None).await
    }
}

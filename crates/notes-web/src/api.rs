//! Browser transport for the shared API client.
//!
//! Requests go out through gloo-net (`fetch`). The bearer header is added by
//! the client's interceptor before the request reaches this layer.

use gloo_net::http::Request;

use notes_common::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};
use notes_common::{ApiClient, ClientConfig};

use crate::storage::LocalStorageSession;

/// The client type every view pulls from context.
pub type WebApi = ApiClient<GlooTransport, LocalStorageSession>;

/// Build the app-wide client from the build-time base URL.
pub fn client() -> WebApi {
    let config = ClientConfig::from_build_env();
    log::info!("API base URL: {}", config.api_base_url);
    ApiClient::new(config, GlooTransport, LocalStorageSession)
}

/// `fetch`-backed [`Transport`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let outgoing = match &request.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError(e.to_string()))?;

        let resp = outgoing
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = resp.status();
        // A response arrived; an unreadable body is treated as empty.
        let text = resp.text().await.unwrap_or_default();
        Ok(HttpResponse::from_text(status, &text))
    }
}

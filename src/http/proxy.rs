//! Upstream forwarding for proxied API requests.
//!
//! # Responsibilities
//! - Issue the outbound POST for a buffered inbound body
//! - Relay the backend's status, content-type, and body to the caller
//! - Map transport failures to the fixed 502 JSON error
//!
//! # Design Decisions
//! - The inbound body is fully accumulated before dialing out; maximum
//!   request size is bounded by available memory, not by a configured limit
//! - Only status and content-type are taken from the backend response; the
//!   body is streamed through untouched
//! - No retry and, by default, no timeout: a hung backend hangs the caller

use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    http::{header, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use serde_json::json;
use thiserror::Error;

/// Outbound HTTP client, shared across requests.
pub type UpstreamClient = Client<HttpConnector, Body>;

/// Error taxonomy for the upstream leg.
///
/// Every variant surfaces to the caller as the same 502; the distinction
/// only exists for the operator log.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The outbound URI could not be built from config + path.
    #[error("invalid upstream uri: {0}")]
    Uri(#[from] axum::http::uri::InvalidUri),

    /// The outbound request could not be assembled.
    #[error("failed to build upstream request: {0}")]
    Http(#[from] axum::http::Error),

    /// Connect or transport failure talking to the backend.
    #[error("upstream request failed: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    /// The configured upstream timeout elapsed.
    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),
}

/// Forward an API request to the backend and relay its response.
///
/// `path` is the inbound path including the API prefix; it is forwarded
/// verbatim. The body has already been fully read by the caller. The
/// payload is never inspected.
pub async fn forward(
    client: &UpstreamClient,
    authority: &str,
    path: &str,
    body: Bytes,
    timeout: Option<Duration>,
) -> Result<Response, ProxyError> {
    let uri: Uri = format!("http://{}{}", authority, path).parse()?;

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))?;

    let response = match timeout {
        Some(limit) => match tokio::time::timeout(limit, client.request(request)).await {
            Ok(result) => result?,
            Err(_) => return Err(ProxyError::Timeout(limit)),
        },
        None => client.request(request).await?,
    };

    let status = response.status();
    let content_type = response.headers().get(header::CONTENT_TYPE).cloned();

    // Only status and content-type come from the backend; the CORS layer
    // re-asserts the origin header on the way out.
    let mut relayed = Response::builder().status(status);
    if let Some(content_type) = content_type {
        relayed = relayed.header(header::CONTENT_TYPE, content_type);
    }
    Ok(relayed.body(Body::new(response.into_body()))?)
}

/// The caller-visible 502 produced for any [`ProxyError`].
pub fn bad_gateway() -> Response {
    (
        StatusCode::BAD_GATEWAY,
        [(header::CONTENT_TYPE, "application/json")],
        json!({"error": "Failed to connect to LLM server"}).to_string(),
    )
        .into_response()
}

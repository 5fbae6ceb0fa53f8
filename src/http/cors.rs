//! CORS header injection.
//!
//! # Responsibilities
//! - Attach the permissive CORS headers to every response
//! - Re-assert the origin header on proxied responses
//!
//! # Design Decisions
//! - Headers are inserted after the inner service runs, so anything the
//!   backend set is overwritten rather than duplicated
//! - The allow-lists are fixed: a local browser page only ever needs
//!   GET/POST/OPTIONS and a Content-Type request header

use axum::{
    body::Body,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderValue, Request,
    },
    middleware::Next,
    response::Response,
};

/// `Access-Control-Allow-Origin` value: any origin.
pub const ALLOW_ORIGIN: &str = "*";

/// `Access-Control-Allow-Methods` value.
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";

/// `Access-Control-Allow-Headers` value.
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Middleware that stamps the CORS headers on every response.
pub async fn apply_cors(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ALLOW_ORIGIN));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
    response
}

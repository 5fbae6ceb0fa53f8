//! The relay's ordered routing table.
//!
//! # Responsibilities
//! - Decide what a request gets: preflight, static page, proxy, or 404
//! - Keep the decision pure so it can be tested without a socket
//!
//! # Design Decisions
//! - OPTIONS short-circuits on any path (browser pre-flight)
//! - Only the exact path "/" serves the page
//! - Only POST is proxied under the API prefix; other methods fall through

use axum::http::Method;

/// Path prefix for proxied API requests.
pub const API_PREFIX: &str = "/v1/";

/// Outcome of routing table evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Pre-flight short-circuit: 200, empty body.
    Preflight,
    /// Serve the static HTML asset.
    StaticPage,
    /// Forward to the backend at the same path.
    Proxy,
    /// Nothing matched: 404.
    NotFound,
}

/// Evaluate the routing table for a request.
pub fn decide(method: &Method, path: &str) -> RouteDecision {
    if method == Method::OPTIONS {
        return RouteDecision::Preflight;
    }
    if method == Method::GET && path == "/" {
        return RouteDecision::StaticPage;
    }
    if method == Method::POST && path.starts_with(API_PREFIX) {
        return RouteDecision::Proxy;
    }
    RouteDecision::NotFound
}

//! Local CORS relay for LLM backends.
//!
//! Serves a single static page and forwards `POST /v1/*` requests to a
//! local backend service, injecting permissive cross-origin headers so a
//! browser page can call that backend despite same-origin restrictions.
//!
//! # Architecture Overview
//!
//! ```text
//!   Browser ── OPTIONS any    ──▶ ┌───────────────────────────────┐
//!   Browser ── GET /          ──▶ │          CORS RELAY           │
//!   Browser ── POST /v1/...   ──▶ │                               │
//!                                 │  routing table (in order):    │
//!                                 │    OPTIONS any   → 200 empty  │
//!                                 │    GET /         → index.html │
//!                                 │    POST /v1/*    → backend ───┼──▶ LLM server
//!                                 │    anything else → 404        │    (localhost:1234)
//!                                 │                               │
//!                                 │  every response: CORS headers │
//!                                 └───────────────────────────────┘
//! ```
//!
//! Each request is handled independently; the relay keeps no state across
//! requests and never interprets the proxied payload.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod routing;

pub use config::RelayConfig;
pub use http::RelayServer;
pub use lifecycle::Shutdown;

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, relay handler)
//!     → request.rs (assign request ID)
//!     → cors.rs (inject CORS headers on every response)
//!     → routing table decides: static_page.rs | proxy.rs | 404
//!     → Send to client
//! ```

pub mod cors;
pub mod proxy;
pub mod request;
pub mod server;
pub mod static_page;

pub use request::{RequestId, RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use server::RelayServer;

//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → table.rs (evaluate rules in order)
//!     → Return: RouteDecision (preflight | static page | proxy | not found)
//! ```
//!
//! # Design Decisions
//! - The table is fixed at compile time; rules are evaluated in order
//! - First match wins; NotFound is explicit, never a silent default
//! - Path matching is case-sensitive prefix/exact comparison, no regex
//! - CORS header injection is orthogonal to the table (middleware)

pub mod table;

pub use table::{decide, RouteDecision, API_PREFIX};

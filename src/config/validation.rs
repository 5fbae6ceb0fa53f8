//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (addresses parse, ports valid, paths non-empty)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::RelayConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Config field the error refers to.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!(
                "not a valid socket address: {:?}",
                config.listener.bind_address
            ),
        });
    }

    if config.backend.host.is_empty() {
        errors.push(ValidationError {
            field: "backend.host",
            message: "must not be empty".to_string(),
        });
    }

    if config.backend.port == 0 {
        errors.push(ValidationError {
            field: "backend.port",
            message: "must not be zero".to_string(),
        });
    }

    if config.static_page.path.as_os_str().is_empty() {
        errors.push(ValidationError {
            field: "static_page.path",
            message: "must not be empty".to_string(),
        });
    }

    if config.timeouts.upstream_secs == Some(0) {
        errors.push(ValidationError {
            field: "timeouts.upstream_secs",
            message: "zero would fail every request; omit it to wait indefinitely".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Backend origin proxied requests are forwarded to.
    pub backend: BackendConfig,

    /// Static page served on root GET.
    pub static_page: StaticPageConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    pub bind_address: String,
}

impl ListenerConfig {
    /// Replace the port part of the bind address, keeping the host.
    ///
    /// Leaves the address untouched when it does not parse; validation
    /// reports the malformed address afterwards.
    pub fn set_port(&mut self, port: u16) {
        if let Ok(mut addr) = self.bind_address.parse::<SocketAddr>() {
            addr.set_port(port);
            self.bind_address = addr.to_string();
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Backend origin configuration.
///
/// Both fields are fixed at startup; the relay never routes per-request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend host (name or address, e.g., "localhost").
    pub host: String,

    /// Backend port.
    pub port: u16,
}

impl BackendConfig {
    /// Authority string used for outbound request URIs ("host:port").
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Full origin for operator-facing logs ("http://host:port").
    pub fn origin(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1234,
        }
    }
}

/// Static page configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticPageConfig {
    /// Path to the HTML asset, resolved relative to the working directory.
    pub path: PathBuf,
}

impl Default for StaticPageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("index.html"),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Optional timeout in seconds for the proxied upstream leg.
    ///
    /// `None` preserves the relay's inherited behavior: the caller waits
    /// exactly as long as the backend takes, with no bound. Setting a value
    /// turns a backend slower than the bound into the same 502 a refused
    /// connection produces.
    pub upstream_secs: Option<u64>,
}

impl TimeoutConfig {
    /// Upstream timeout as a `Duration`, if one is configured.
    pub fn upstream(&self) -> Option<Duration> {
        self.upstream_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: RelayConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.backend.host, "localhost");
        assert_eq!(config.backend.port, 1234);
        assert_eq!(config.static_page.path, PathBuf::from("index.html"));
        assert_eq!(config.timeouts.upstream_secs, None);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config: RelayConfig = toml::from_str("[backend]\nport = 8080\n").unwrap();
        assert_eq!(config.backend.port, 8080);
        assert_eq!(config.backend.host, "localhost");
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
    }

    #[test]
    fn test_set_port_keeps_host() {
        let mut listener = ListenerConfig::default();
        listener.set_port(4000);
        assert_eq!(listener.bind_address, "127.0.0.1:4000");
    }

    #[test]
    fn test_set_port_on_malformed_address_is_noop() {
        let mut listener = ListenerConfig {
            bind_address: "not an address".to_string(),
        };
        listener.set_port(4000);
        assert_eq!(listener.bind_address, "not an address");
    }

    #[test]
    fn test_backend_authority() {
        let backend = BackendConfig::default();
        assert_eq!(backend.authority(), "localhost:1234");
        assert_eq!(backend.origin(), "http://localhost:1234");
    }
}

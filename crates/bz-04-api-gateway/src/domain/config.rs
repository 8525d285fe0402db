//! Gateway configuration with validation.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Port the marketplace API listens on unless configured otherwise.
pub const DEFAULT_API_PORT: u16 = 4002;

/// Largest request body accepted (contracts and ratings included).
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// HTTP gateway configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bind address
    pub host: IpAddr,
    /// Bind port
    pub port: u16,
    /// Whether the node serves the API at all
    pub enabled: bool,
    /// Request body limit in bytes
    pub max_body_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_API_PORT,
            enabled: true,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_body_bytes cannot be 0".into(),
            ));
        }
        Ok(())
    }

    /// Socket address the server binds to.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("port cannot be 0 while the API is enabled")]
    InvalidPort,
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
}

//! Domain layer for the API gateway: configuration and the error surface.

pub mod config;
pub mod error;

pub use config::{ConfigError, GatewayConfig, DEFAULT_API_PORT, DEFAULT_MAX_BODY_BYTES};
pub use error::{status_for, ApiError};

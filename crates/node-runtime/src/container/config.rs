//! # Node Configuration
//!
//! Unified configuration for all subsystems and runtime parameters.
//!
//! Sources, later ones winning:
//!
//! 1. Built-in defaults
//! 2. TOML file named by `BZ_CONFIG` (optional)
//! 3. `BZ_API_HOST`, `BZ_API_PORT`, `BZ_BUS_CAPACITY`
//!
//! Telemetry settings come from the `BZ_*` logging variables read by
//! [`TelemetryConfig::from_lookup`]; the `[telemetry]` table only fills in
//! what the environment leaves unset.

use bazaar_telemetry::TelemetryConfig;
use bz_03_moderator_discovery::DiscoveryConfig;
use bz_04_api_gateway::GatewayConfig;
use serde::Deserialize;
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use std::path::PathBuf;

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// HTTP API.
    pub api: GatewayConfig,
    /// Moderator discovery.
    pub discovery: DiscoveryConfig,
    /// Logging overrides.
    pub telemetry: TelemetrySection,
    /// Event bus buffer per subscriber.
    pub bus_capacity: usize,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            api: GatewayConfig::default(),
            discovery: DiscoveryConfig::default(),
            telemetry: TelemetrySection::default(),
            bus_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// `[telemetry]` table of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TelemetrySection {
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
}

impl NodeConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("BZ_CONFIG") {
            Some(path) => Self::from_file(PathBuf::from(path))?,
            None => Self::default(),
        };

        if let Some(host) = lookup("BZ_API_HOST") {
            config.api.host = parse_var("BZ_API_HOST", &host)?;
        }
        if let Some(port) = lookup("BZ_API_PORT") {
            config.api.port = parse_var("BZ_API_PORT", &port)?;
        }
        if let Some(capacity) = lookup("BZ_BUS_CAPACITY") {
            config.bus_capacity = parse_var("BZ_BUS_CAPACITY", &capacity)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        if self.bus_capacity == 0 {
            return Err(ConfigError::InvalidBusCapacity);
        }
        if self.discovery.max_results == 0 {
            return Err(ConfigError::InvalidDiscovery(
                "max_results cannot be 0".into(),
            ));
        }
        Ok(())
    }

    /// Telemetry settings: environment first, then the config file.
    pub fn telemetry_config<F>(&self, lookup: F) -> TelemetryConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut telemetry = TelemetryConfig::from_lookup(&lookup);
        if lookup("BZ_LOG_LEVEL").is_none() && lookup("RUST_LOG").is_none() {
            if let Some(level) = &self.telemetry.log_level {
                telemetry.log_level = level.clone();
            }
        }
        if lookup("BZ_JSON_LOGS").is_none() {
            if let Some(json) = self.telemetry.json_logs {
                telemetry.json_logs = json;
            }
        }
        telemetry
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
    })
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(String),

    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },

    #[error("bus capacity cannot be 0")]
    InvalidBusCapacity,

    #[error("invalid discovery configuration: {0}")]
    InvalidDiscovery(String),

    #[error(transparent)]
    Gateway(#[from] bz_04_api_gateway::ConfigError),
}

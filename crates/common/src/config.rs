use std::env;
use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_RELAY_ENDPOINT: &str = "tcp://0.0.0.0:5050";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("BRIDGE_HTTP_ADDR is not a socket address: {0}")]
    InvalidHttpAddr(String),
    #[error("BRIDGE_RELAY_ENDPOINT must not be empty")]
    EmptyRelayEndpoint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub http_addr: SocketAddr,
    /// Endpoint the PUSH socket binds. Consumers connect here.
    pub relay_endpoint: String,
    pub log_filter: String,
}

impl BridgeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("BRIDGE_HTTP_ADDR").unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string());
        let http_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidHttpAddr(raw_addr.clone()))?;

        let relay_endpoint = lookup("BRIDGE_RELAY_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_RELAY_ENDPOINT.to_string())
            .trim()
            .to_string();
        if relay_endpoint.is_empty() {
            return Err(ConfigError::EmptyRelayEndpoint);
        }

        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            http_addr,
            relay_endpoint,
            log_filter,
        })
    }
}

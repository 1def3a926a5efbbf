//! Server configuration.

use std::net::SocketAddr;

use super::parse::{env_opt, env_parse};
use super::ConfigError;

/// Default body buffering limit (1 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Echo server configuration loaded from environment.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `LISTEN_ADDR` | `0.0.0.0:8080` | Server bind address |
/// | `MAX_BODY_SIZE` | `1048576` | Largest body buffered before answering 413 |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server bind address.
    pub listen_addr: SocketAddr,
    /// Largest request body (bytes) the server will buffer.
    pub max_body_size: usize,
}

impl ServerConfig {
    /// Create a configuration for the given address with default limits.
    pub fn new(listen_addr: SocketAddr) -> Self {
        Self {
            listen_addr,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Set the body buffering limit.
    pub fn with_max_body_size(mut self, bytes: usize) -> Self {
        self.max_body_size = bytes;
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr_value = env_opt("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let listen_addr = addr_value.parse().map_err(|e| ConfigError::Parse {
            key: "LISTEN_ADDR".into(),
            value: addr_value.clone(),
            error: format!("{}", e),
        })?;

        let max_body_size = env_parse("MAX_BODY_SIZE", DEFAULT_MAX_BODY_SIZE)?;
        if max_body_size == 0 {
            return Err(ConfigError::Invalid {
                key: "MAX_BODY_SIZE".into(),
                message: "must be greater than 0".into(),
            });
        }

        Ok(Self::new(listen_addr).with_max_body_size(max_body_size))
    }
}

//! Configuration for the hpp_guard echo server.
//!
//! All settings come from environment variables.
//!
//! # Example
//!
//! ```
//! use hpp_guard::config::Config;
//! use hpp_guard::HppGuard;
//!
//! let config = Config::from_env()?;
//! let guard = HppGuard::new(config.hpp.to_guard_config());
//! assert_eq!(guard.config().check_query, config.hpp.check_query);
//! # Ok::<(), hpp_guard::config::ConfigError>(())
//! ```

mod error;
mod hpp;
mod logging;
mod parse;
mod server;

pub use error::ConfigError;
pub use hpp::{BodySource, HppSettings};
pub use logging::{LogFormat, LoggingConfig};
pub use server::{ServerConfig, DEFAULT_MAX_BODY_SIZE};

/// Complete application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Parameter pollution guard settings.
    pub hpp: HppSettings,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            hpp: HppSettings::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    /// Print configuration summary to log.
    pub fn log_summary(&self) {
        use tracing::info;

        info!("Configuration loaded:");
        info!("  Listen: {}", self.server.listen_addr);
        info!("  Max body size: {} bytes", self.server.max_body_size);
        info!(
            "  HPP query check: {}",
            if self.hpp.check_query { "enabled" } else { "disabled" }
        );

        if self.hpp.check_body {
            info!("  HPP body check: enabled (source: {})", self.hpp.body_source);
        } else {
            info!("  HPP body check: disabled");
        }
    }
}

//! Logging configuration.

use super::parse::env_or;
use super::ConfigError;

/// Default filter when neither LOG_LEVEL nor RUST_LOG is set.
const DEFAULT_FILTER: &str = "hpp_guard=info";

/// Output format for log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Human-readable tracing-subscriber output.
    Pretty,
}

/// Logging configuration loaded from environment.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Log level filter (from LOG_LEVEL or RUST_LOG).
    pub filter: String,
    /// Service name for structured logging.
    pub service_name: String,
    /// Output format (LOG_FORMAT=json|pretty, default json).
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Load configuration from environment variables.
    ///
    /// LOG_LEVEL accepts simple values: trace, debug, info, warn, error.
    /// RUST_LOG accepts full tracing filter syntax: hpp_guard=debug,hyper=warn.
    pub fn from_env() -> Result<Self, ConfigError> {
        let format = match env_or("LOG_FORMAT", "json").to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" | "text" => LogFormat::Pretty,
            other => {
                return Err(ConfigError::Invalid {
                    key: "LOG_FORMAT".into(),
                    message: format!("expected 'json' or 'pretty', got '{}'", other),
                })
            }
        };

        Ok(Self {
            filter: Self::resolve_log_filter(),
            service_name: env_or("SERVICE_NAME", "hpp_guard"),
            format,
        })
    }

    /// Resolve log filter from environment.
    ///
    /// Priority: LOG_LEVEL > RUST_LOG > default (info)
    fn resolve_log_filter() -> String {
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            let level = level.to_lowercase();
            match level.as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => {
                    return format!("hpp_guard={}", level);
                }
                _ => {
                    // Logging is not up yet, so stderr is the only channel
                    eprintln!(
                        "Warning: Invalid LOG_LEVEL '{}', expected: trace, debug, info, warn, error",
                        level
                    );
                }
            }
        }

        if let Ok(filter) = std::env::var("RUST_LOG") {
            return filter;
        }

        DEFAULT_FILTER.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_log_level_priority() {
        env::remove_var("LOG_LEVEL");
        env::remove_var("RUST_LOG");

        assert_eq!(LoggingConfig::resolve_log_filter(), "hpp_guard=info");

        env::set_var("RUST_LOG", "hpp_guard=warn,hyper=debug");
        assert_eq!(
            LoggingConfig::resolve_log_filter(),
            "hpp_guard=warn,hyper=debug"
        );

        // LOG_LEVEL takes priority over RUST_LOG
        env::set_var("LOG_LEVEL", "DEBUG");
        assert_eq!(LoggingConfig::resolve_log_filter(), "hpp_guard=debug");

        // Invalid LOG_LEVEL falls through to RUST_LOG
        env::set_var("LOG_LEVEL", "loud");
        assert_eq!(
            LoggingConfig::resolve_log_filter(),
            "hpp_guard=warn,hyper=debug"
        );

        env::remove_var("LOG_LEVEL");
        env::remove_var("RUST_LOG");
    }

    #[test]
    fn test_log_format() {
        env::set_var("LOG_FORMAT", "pretty");
        assert_eq!(LoggingConfig::from_env().unwrap().format, LogFormat::Pretty);

        env::set_var("LOG_FORMAT", "xml");
        assert!(LoggingConfig::from_env().is_err());

        env::remove_var("LOG_FORMAT");
        assert_eq!(LoggingConfig::from_env().unwrap().format, LogFormat::Json);
    }
}

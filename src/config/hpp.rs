//! Parameter pollution guard settings.

use std::fmt;
use std::str::FromStr;

use super::parse::{env_bool, env_opt};
use super::ConfigError;
use crate::middleware::{accessors, HppConfig};

/// Where the guard reads the raw form body from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodySource {
    /// The buffered request body.
    #[default]
    Buffer,
    /// The URL query (the guard's placeholder default; rarely what you want).
    Url,
}

impl FromStr for BodySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buffer" | "body" => Ok(BodySource::Buffer),
            "url" => Ok(BodySource::Url),
            other => Err(format!("expected 'buffer' or 'url', got '{}'", other)),
        }
    }
}

impl fmt::Display for BodySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodySource::Buffer => f.write_str("buffer"),
            BodySource::Url => f.write_str("url"),
        }
    }
}

/// HPP guard settings loaded from environment.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `HPP_CHECK_QUERY` | `true` | Collapse repeated query parameters |
/// | `HPP_CHECK_BODY` | `false` | Collapse repeated form body parameters |
/// | `HPP_BODY_SOURCE` | `buffer` | `buffer` or `url` |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HppSettings {
    pub check_query: bool,
    pub check_body: bool,
    pub body_source: BodySource,
}

impl Default for HppSettings {
    fn default() -> Self {
        Self {
            check_query: true,
            check_body: false,
            body_source: BodySource::Buffer,
        }
    }
}

impl HppSettings {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let body_source = match env_opt("HPP_BODY_SOURCE") {
            Some(v) => v.parse().map_err(|message| ConfigError::Invalid {
                key: "HPP_BODY_SOURCE".into(),
                message,
            })?,
            None => BodySource::default(),
        };

        Ok(Self {
            check_query: env_bool("HPP_CHECK_QUERY", true)?,
            check_body: env_bool("HPP_CHECK_BODY", false)?,
            body_source,
        })
    }

    /// Build the guard configuration these settings describe.
    pub fn to_guard_config(&self) -> HppConfig {
        let config = HppConfig::new()
            .with_check_query(self.check_query)
            .with_check_body(self.check_body);

        match self.body_source {
            BodySource::Buffer => config.with_access_body(accessors::buffered_body),
            BodySource::Url => config,
        }
    }
}

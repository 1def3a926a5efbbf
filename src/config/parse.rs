//! Environment variable parsing utilities.

use std::str::FromStr;

use super::ConfigError;

/// Get environment variable with default value.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get optional environment variable (None if empty or missing).
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

/// Parse a boolean flag: "1"/"true"/"yes"/"on" and "0"/"false"/"no"/"off",
/// case-insensitive. Anything else is an error.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse environment variable as boolean, falling back to `default` when unset.
pub fn env_bool(key: &str, default: bool) -> Result<bool, ConfigError> {
    match env_opt(key) {
        Some(v) => parse_bool(&v).ok_or_else(|| ConfigError::Invalid {
            key: key.into(),
            message: format!("expected a boolean, got '{}'", v),
        }),
        None => Ok(default),
    }
}

/// Parse environment variable with type conversion.
pub fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env_opt(key) {
        Some(v) => v.parse().map_err(|e: T::Err| ConfigError::Parse {
            key: key.into(),
            value: v,
            error: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        for v in ["1", "true", "TRUE", "yes", "On", " true "] {
            assert_eq!(parse_bool(v), Some(true), "{}", v);
        }
        for v in ["0", "false", "False", "no", "OFF"] {
            assert_eq!(parse_bool(v), Some(false), "{}", v);
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_env_parse_and_bool() {
        std::env::set_var("HPP_TEST_PARSE_NUM", "42");
        std::env::set_var("HPP_TEST_PARSE_BAD", "forty-two");
        std::env::set_var("HPP_TEST_PARSE_FLAG", "nope");
        std::env::remove_var("HPP_TEST_PARSE_MISSING");

        assert_eq!(env_parse("HPP_TEST_PARSE_NUM", 0u32).unwrap(), 42);
        assert_eq!(env_parse("HPP_TEST_PARSE_MISSING", 7u32).unwrap(), 7);
        assert!(matches!(
            env_parse("HPP_TEST_PARSE_BAD", 0u32),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            env_bool("HPP_TEST_PARSE_FLAG", true),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(env_bool("HPP_TEST_PARSE_MISSING", true).unwrap());

        std::env::remove_var("HPP_TEST_PARSE_NUM");
        std::env::remove_var("HPP_TEST_PARSE_BAD");
        std::env::remove_var("HPP_TEST_PARSE_FLAG");
    }
}

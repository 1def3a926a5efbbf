//! Core error types.

use std::fmt;

/// Errors raised while extracting or decoding request parameters.
///
/// The HPP guard never invents errors of its own: every variant here comes
/// from an accessor or from the percent-decoder and is handed back to the
/// host unchanged. Custom accessors that read from an I/O source can use `?`
/// on `std::io::Error`, which converts into [`Error::Io`].
#[derive(Debug)]
pub enum Error {
    /// A key or value contained an invalid percent-escape or decoded to
    /// bytes that are not UTF-8.
    MalformedEncoding {
        /// The raw (still encoded) component that failed to decode.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// An accessor could not produce the raw parameter string.
    Accessor(String),

    /// An accessor failed while reading its source.
    Io(std::io::Error),
}

impl Error {
    /// Build a [`Error::MalformedEncoding`] for the given raw component.
    #[inline]
    pub fn malformed(input: &str, reason: &'static str) -> Self {
        Error::MalformedEncoding {
            input: input.to_string(),
            reason,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedEncoding { input, reason } => {
                write!(f, "malformed encoding in '{}': {}", input, reason)
            }
            Error::Accessor(msg) => write!(f, "accessor failed: {}", msg),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::malformed("%zz", "invalid percent-escape");
        assert_eq!(
            err.to_string(),
            "malformed encoding in '%zz': invalid percent-escape"
        );

        let err = Error::Accessor("body was never buffered".to_string());
        assert_eq!(err.to_string(), "accessor failed: body was never buffered");

        let err = Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "reset"));
        assert_eq!(err.to_string(), "I/O error: reset");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "body truncated");
        let err: Error = io_err.into();

        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_decode_errors_have_no_source() {
        let err = Error::malformed("%E0%A4", "not valid UTF-8");
        assert!(std::error::Error::source(&err).is_none());
    }
}

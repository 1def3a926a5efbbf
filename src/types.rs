//! Shared parameter types.

use std::collections::HashMap;

use serde::Serialize;

/// Flat, decoded parameter mapping (one value per key).
///
/// Iteration order carries no meaning; only the final value per key does.
pub type ParamMap = HashMap<String, String>;

/// Collapsed parameters attached to a request by the HPP guard.
///
/// A field is `None` when its check is disabled, when gating skipped it,
/// or when the raw string was empty. It is never set to an empty map.
///
/// Serializes as `{"query": {...} | null, "body": {...} | null}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedParams {
    /// Collapsed query string parameters.
    pub query: Option<ParamMap>,
    /// Collapsed form-urlencoded body parameters.
    pub body: Option<ParamMap>,
}

impl ParsedParams {
    /// True if neither field has been set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.body.is_none()
    }
}

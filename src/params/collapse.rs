//! Last-value-wins parsing of form/percent-encoded parameter strings.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::core::{Error, Result};
use crate::types::ParamMap;

/// Characters escaped when re-serializing (application/x-www-form-urlencoded set).
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Outcome of collapsing a raw string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collapsed {
    /// One decoded value per key, taken from the key's last occurrence.
    pub params: ParamMap,
    /// Number of non-empty pairs seen in the raw string.
    pub pairs: usize,
}

impl Collapsed {
    /// Number of pairs that were overwritten by a later occurrence of the same key.
    #[inline]
    pub fn overwritten(&self) -> usize {
        self.pairs - self.params.len()
    }
}

/// Parse a raw encoded string into a flat mapping where the last
/// occurrence of every key wins.
///
/// - pairs are separated by `&`; empty pairs (`&&`, leading or trailing `&`) are dropped
/// - a pair is split on its first `=`; without `=` the value is empty
/// - `=value` is kept and stored under the empty key
/// - `+` decodes to a space before `%XX` escapes are decoded
///
/// An invalid escape or a non-UTF-8 result fails the whole string.
///
/// # Example
///
/// ```
/// let params = hpp_guard::params::collapse("role=user&role=admin&x").unwrap();
/// assert_eq!(params["role"], "admin");
/// assert_eq!(params["x"], "");
/// ```
pub fn collapse(raw: &str) -> Result<ParamMap> {
    collapse_counted(raw).map(|c| c.params)
}

/// Same as [`collapse`], also reporting how many pairs were seen.
pub fn collapse_counted(raw: &str) -> Result<Collapsed> {
    let pair_count = raw.matches('&').count() + 1;
    let mut params = ParamMap::with_capacity(pair_count.min(16));
    let mut pairs = 0;

    for pair in raw.split('&') {
        if pair.is_empty() {
            continue;
        }

        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));

        params.insert(decode_component(key)?, decode_component(value)?);
        pairs += 1;
    }

    Ok(Collapsed { params, pairs })
}

/// Decode one key or value: `+` to space, then percent-escapes.
fn decode_component(raw: &str) -> Result<String> {
    if !raw.contains(['+', '%']) {
        return Ok(raw.to_string());
    }

    check_escapes(raw)?;

    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| Error::malformed(raw, "decoded bytes are not valid UTF-8"))
}

/// Every `%` must start a complete two-hex-digit escape.
///
/// `percent_decode_str` passes broken escapes through untouched; we reject them instead.
fn check_escapes(raw: &str) -> Result<()> {
    let bytes = raw.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(Error::malformed(raw, "invalid percent-escape"));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    Ok(())
}

/// Serialize a mapping back into a form-encoded string.
///
/// Keys are emitted in sorted order so the output is deterministic.
/// Spaces become `+`, so `collapse(&to_query_string(&m))` returns `m`.
pub fn to_query_string(params: &ParamMap) -> String {
    let mut keys: Vec<&String> = params.keys().collect();
    keys.sort();

    let mut out = String::new();
    for key in keys {
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(&encode_component(key));
        out.push('=');
        out.push_str(&encode_component(&params[key]));
    }
    out
}

fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, FORM_ENCODE_SET)
        .to_string()
        .replace("%20", "+")
}

//! Media type classification for request bodies.

/// Media type of HTML form submissions.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Return the media type of a Content-Type value: parameters stripped,
/// surrounding whitespace trimmed, ASCII lower-cased.
#[inline]
pub fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// True iff the header names the form-urlencoded media type.
///
/// Parameters such as `charset` are ignored; an absent header is not a form.
#[inline]
pub fn is_form_urlencoded(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|v| media_type(v) == FORM_URLENCODED)
}

//! HTTP request abstraction for middleware and handlers.

use bytes::Bytes;
use http::header::{self, HeaderName};
use http::{HeaderMap, Method, Uri};

use crate::types::ParsedParams;

/// Header name constants for fast lookup.
mod header_names {
    use super::*;

    pub static CONTENT_TYPE: HeaderName = header::CONTENT_TYPE;
}

/// Lazily initialized custom header names.
static X_REQUEST_ID: std::sync::LazyLock<HeaderName> =
    std::sync::LazyLock::new(|| HeaderName::from_static("x-request-id"));

/// HTTP request with a fully buffered body.
///
/// Besides the wire data, the request carries [`ParsedParams`], the only
/// state the HPP guard writes.
///
/// Note: Clone is intentionally not derived to prevent expensive copies.
/// Use references or move semantics instead.
#[derive(Debug)]
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    params: ParsedParams,
}

impl Request {
    /// Create a new request.
    #[inline]
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
            params: ParsedParams::default(),
        }
    }

    /// Get the HTTP method.
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Check for POST, ignoring ASCII case.
    ///
    /// `http::Method` is case-sensitive, so a client sending `post`
    /// produces an extension method rather than `Method::POST`.
    #[inline]
    pub fn is_post(&self) -> bool {
        self.method.as_str().eq_ignore_ascii_case("POST")
    }

    /// Get the request path.
    #[inline]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Get the query string (without the leading `?`).
    #[inline]
    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Get the buffered request body.
    #[inline]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Get a header value by name (fast path with HeaderName constant).
    #[inline]
    fn header_by_name(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get a header value by string name (slower, case-insensitive).
    #[inline]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get Content-Type header.
    ///
    /// Non-visible-ASCII values are reported as absent.
    #[inline]
    pub fn content_type(&self) -> Option<&str> {
        self.header_by_name(&header_names::CONTENT_TYPE)
    }

    /// Get X-Request-ID header.
    #[inline]
    pub fn request_id(&self) -> Option<&str> {
        self.header_by_name(&X_REQUEST_ID)
    }

    /// Parameters collapsed by the HPP guard.
    #[inline]
    pub fn params(&self) -> &ParsedParams {
        &self.params
    }

    /// Mutable access to the collapsed parameters.
    #[inline]
    pub fn params_mut(&mut self) -> &mut ParsedParams {
        &mut self.params
    }

    /// Consume the request, keeping only the collapsed parameters.
    #[inline]
    pub fn into_params(self) -> ParsedParams {
        self.params
    }
}

impl<B> From<http::Request<B>> for Request
where
    B: Into<Bytes>,
{
    fn from(req: http::Request<B>) -> Self {
        let (parts, body) = req.into_parts();
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body: body.into(),
            params: ParsedParams::default(),
        }
    }
}

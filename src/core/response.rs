//! HTTP response abstraction for middleware and handlers.

use bytes::Bytes;
use http::header::{self, HeaderName};
use http::{HeaderMap, HeaderValue, StatusCode};

/// Common header name constants for fast lookup.
mod header_names {
    use super::*;
    pub static CONTENT_TYPE: HeaderName = header::CONTENT_TYPE;
}

/// Pre-allocated static header values for common content types.
mod content_types {
    use super::*;
    pub static TEXT_PLAIN: HeaderValue = HeaderValue::from_static("text/plain; charset=utf-8");
    pub static APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");
}

/// Pre-allocated static bodies for common responses.
mod static_bodies {
    use super::*;
    pub static PAYLOAD_TOO_LARGE: Bytes = Bytes::from_static(b"Payload Too Large");
}

/// HTTP response.
///
/// Note: Clone is intentionally not derived to prevent expensive copies.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Create a new response builder.
    #[inline]
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::new()
    }

    /// Create a 200 OK response with body.
    #[inline]
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Create a 200 OK JSON response.
    #[inline]
    pub fn json(body: impl Into<Bytes>) -> Self {
        Self::builder().json().body(body).build()
    }

    /// Create a 400 Bad Request response with a plain-text reason.
    #[inline]
    pub fn bad_request(msg: &str) -> Self {
        Self::builder()
            .status(StatusCode::BAD_REQUEST)
            .text()
            .body(Bytes::copy_from_slice(msg.as_bytes()))
            .build()
    }

    /// Create a 413 Payload Too Large response (uses static body).
    #[inline]
    pub fn payload_too_large() -> Self {
        Self {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            headers: HeaderMap::new(),
            body: static_bodies::PAYLOAD_TOO_LARGE.clone(),
        }
    }

    /// Get the status code.
    #[inline]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the response body.
    #[inline]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Get a header value by string name (case-insensitive).
    #[inline]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Add a header by string name and value. Invalid pairs are ignored.
    #[inline]
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Get Content-Type header.
    #[inline]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(&header_names::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

impl From<Response> for http::Response<Bytes> {
    fn from(res: Response) -> Self {
        let mut out = http::Response::new(res.body);
        *out.status_mut() = res.status;
        *out.headers_mut() = res.headers;
        out
    }
}

/// Builder for creating HTTP responses.
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Option<HeaderMap>, // Lazy allocation
    body: Bytes,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseBuilder {
    /// Create a new response builder.
    #[inline]
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: None,
            body: Bytes::new(),
        }
    }

    /// Set the status code.
    #[inline]
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Add header with typed HeaderName and HeaderValue.
    #[inline]
    pub fn header_value(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers
            .get_or_insert_with(HeaderMap::new)
            .insert(name, value);
        self
    }

    /// Add header by strings.
    #[inline]
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers
                .get_or_insert_with(HeaderMap::new)
                .insert(name, value);
        }
        self
    }

    /// Set the body.
    #[inline]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Set Content-Type to application/json.
    #[inline]
    pub fn json(self) -> Self {
        self.header_value(
            header_names::CONTENT_TYPE.clone(),
            content_types::APPLICATION_JSON.clone(),
        )
    }

    /// Set Content-Type to text/plain.
    #[inline]
    pub fn text(self) -> Self {
        self.header_value(
            header_names::CONTENT_TYPE.clone(),
            content_types::TEXT_PLAIN.clone(),
        )
    }

    /// Build the response.
    #[inline]
    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers.unwrap_or_default(),
            body: self.body,
        }
    }
}

//! Synchronous middleware pipeline.
//!
//! Middleware run in priority order before the handler and in reverse order
//! after it. Any middleware may short-circuit with a response. The
//! [`HppGuard`] is the pipeline's parameter-normalization step: it rewrites
//! nothing on the wire and only fills [`Request::params`].
//!
//! # Example
//!
//! ```
//! use std::net::{IpAddr, Ipv4Addr};
//!
//! use bytes::Bytes;
//! use http::{header, HeaderMap, HeaderValue, Method};
//! use hpp_guard::core::{Context, Request, Response};
//! use hpp_guard::middleware::{accessors, HppConfig, HppGuard, MiddlewareChain};
//!
//! let guard = HppGuard::new(
//!     HppConfig::new()
//!         .with_check_body(true)
//!         .with_access_body(accessors::buffered_body),
//! );
//! let chain = MiddlewareChain::new().add(guard);
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(
//!     header::CONTENT_TYPE,
//!     HeaderValue::from_static("application/x-www-form-urlencoded"),
//! );
//! let req = Request::new(
//!     Method::POST,
//!     "/transfer?to=alice&to=mallory".parse().unwrap(),
//!     headers,
//!     Bytes::from_static(b"amount=1&amount=1000"),
//! );
//! let mut ctx = Context::with_generated_id(IpAddr::V4(Ipv4Addr::LOCALHOST));
//!
//! let res = chain.process(req, &mut ctx, |req, _ctx| {
//!     let params = req.params();
//!     let to = params.query.as_ref().and_then(|q| q.get("to")).cloned();
//!     let amount = params.body.as_ref().and_then(|b| b.get("amount")).cloned();
//!     Response::ok(format!("{} {}", to.unwrap_or_default(), amount.unwrap_or_default()))
//! });
//!
//! assert_eq!(res.body().as_ref(), b"mallory 1000");
//! ```

mod chain;
mod hpp;

pub use chain::MiddlewareChain;
pub use hpp::{accessors, Accessor, HppConfig, HppGuard};

use crate::core::{Context, Request, Response};

/// Result of middleware request processing.
#[derive(Debug)]
pub enum MiddlewareResult {
    /// Continue with the (possibly modified) request.
    Next(Request),
    /// Stop the chain and answer with this response.
    Stop(Response),
}

impl MiddlewareResult {
    /// Check if this result continues the chain.
    pub fn is_next(&self) -> bool {
        matches!(self, MiddlewareResult::Next(_))
    }

    /// Check if this result stops the chain.
    pub fn is_stop(&self) -> bool {
        matches!(self, MiddlewareResult::Stop(_))
    }

    /// Unwrap the request if this is a Next result.
    pub fn into_request(self) -> Option<Request> {
        match self {
            MiddlewareResult::Next(req) => Some(req),
            MiddlewareResult::Stop(_) => None,
        }
    }

    /// Unwrap the response if this is a Stop result.
    pub fn into_response(self) -> Option<Response> {
        match self {
            MiddlewareResult::Next(_) => None,
            MiddlewareResult::Stop(res) => Some(res),
        }
    }
}

/// A request/response processing step.
///
/// ```text
/// Request → MW1.on_request → MW2.on_request → Handler
///                                                ↓
/// Response ← MW1.on_response ← MW2.on_response ←─┘
/// ```
///
/// Implementations are shared by all requests, so they must be `Send + Sync`
/// and keep per-request data in the [`Context`] rather than in `self`.
pub trait Middleware: Send + Sync {
    /// Unique name (used for logging).
    fn name(&self) -> &'static str;

    /// Lower values run first for requests, last for responses.
    ///
    /// Suggested ranges:
    /// - -100..-50: Security (parameter normalization, auth)
    /// - -50..0: Logging, tracing
    /// - 0..50: Request modification
    /// - 50..100: Response modification
    fn priority(&self) -> i32 {
        0
    }

    /// Process an incoming request.
    fn on_request(&self, req: Request, _ctx: &mut Context) -> MiddlewareResult {
        MiddlewareResult::Next(req)
    }

    /// Process an outgoing response.
    fn on_response(&self, res: Response, _ctx: &Context) -> Response {
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    struct PassThrough;

    impl Middleware for PassThrough {
        fn name(&self) -> &'static str {
            "pass"
        }
    }

    fn create_test_request(uri: &str) -> Request {
        Request::new(
            http::Method::GET,
            uri.parse().unwrap(),
            http::HeaderMap::new(),
            bytes::Bytes::new(),
        )
    }

    #[test]
    fn test_middleware_result_accessors() {
        let next = MiddlewareResult::Next(create_test_request("/"));
        assert!(next.is_next());
        assert!(!next.is_stop());
        assert!(next.into_request().is_some());

        let stop = MiddlewareResult::Stop(Response::bad_request("no"));
        assert!(stop.is_stop());
        assert!(stop.into_response().is_some());
    }

    #[test]
    fn test_middleware_default_implementations() {
        let mw = PassThrough;
        assert_eq!(mw.priority(), 0);

        let mut ctx = Context::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), "req");

        let result = mw.on_request(create_test_request("/?a=1&a=2"), &mut ctx);
        let req = result.into_request().unwrap();
        // A plain middleware does not touch parameters
        assert!(req.params().is_empty());

        let res = mw.on_response(Response::ok("body"), &ctx);
        assert_eq!(res.status(), http::StatusCode::OK);
    }

    #[test]
    fn test_guard_runs_before_default_priority() {
        let guard = HppGuard::default();
        assert_eq!(guard.name(), "hpp");
        assert!(guard.priority() < PassThrough.priority());
    }
}

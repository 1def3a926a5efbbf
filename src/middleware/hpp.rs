//! HTTP Parameter Pollution guard.
//!
//! Collapses repeated query and form-body parameters to their last value
//! and stores the result in [`ParsedParams`] on the request.
//!
//! ```text
//! GET /transfer?to=alice&amount=10&to=mallory
//!   → params().query == {to: "mallory", amount: "10"}
//! ```
//!
//! Body collapsing only runs for `POST` requests whose Content-Type is
//! `application/x-www-form-urlencoded`. Everything else is left alone.
//!
//! [`ParsedParams`]: crate::types::ParsedParams

use std::fmt;
use std::sync::Arc;

use crate::core::{Context, Error, Request, Response, Result};
use crate::params::{collapse_counted, is_form_urlencoded};

use super::{Middleware, MiddlewareResult};

/// Produces the raw encoded string for one parameter source.
///
/// Accessors run synchronously on already-buffered data. An `Err` aborts the
/// guard and is returned to the caller unchanged.
pub type Accessor = Arc<dyn Fn(&Request) -> Result<String> + Send + Sync>;

/// Ready-made accessors.
pub mod accessors {
    use super::*;

    /// The URL query component (everything after `?`), or empty.
    pub fn url_query(req: &Request) -> Result<String> {
        Ok(req.query().unwrap_or_default().to_string())
    }

    /// The buffered request body, which must be UTF-8.
    pub fn buffered_body(req: &Request) -> Result<String> {
        std::str::from_utf8(req.body())
            .map(str::to_string)
            .map_err(|e| Error::Accessor(format!("request body is not valid UTF-8: {}", e)))
    }
}

/// Guard configuration, built once and shared read-only by every request.
#[derive(Clone)]
pub struct HppConfig {
    /// Collapse query string parameters.
    pub check_query: bool,
    /// Collapse form-urlencoded POST bodies.
    pub check_body: bool,
    access_query: Accessor,
    access_body: Accessor,
    custom_body_accessor: bool,
}

impl HppConfig {
    /// Defaults: query checking on, body checking off, URL accessors.
    pub fn new() -> Self {
        Self {
            check_query: true,
            check_body: false,
            access_query: Arc::new(accessors::url_query),
            // Placeholder: reads the URL, not the body. Hosts enabling body
            // checks must install a real body accessor.
            access_body: Arc::new(accessors::url_query),
            custom_body_accessor: false,
        }
    }

    /// Enable or disable query checking.
    pub fn with_check_query(mut self, enabled: bool) -> Self {
        self.check_query = enabled;
        self
    }

    /// Enable or disable body checking.
    pub fn with_check_body(mut self, enabled: bool) -> Self {
        self.check_body = enabled;
        self
    }

    /// Replace the query accessor.
    pub fn with_access_query<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&Request) -> Result<String> + Send + Sync + 'static,
    {
        self.access_query = Arc::new(accessor);
        self
    }

    /// Replace the body accessor.
    pub fn with_access_body<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&Request) -> Result<String> + Send + Sync + 'static,
    {
        self.access_body = Arc::new(accessor);
        self.custom_body_accessor = true;
        self
    }

    /// True if body checking relies on the placeholder URL accessor.
    pub fn uses_placeholder_body_accessor(&self) -> bool {
        self.check_body && !self.custom_body_accessor
    }
}

impl Default for HppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HppConfig")
            .field("check_query", &self.check_query)
            .field("check_body", &self.check_body)
            .field("custom_body_accessor", &self.custom_body_accessor)
            .finish_non_exhaustive()
    }
}

/// Parameter pollution guard.
///
/// Stateless per request: the only thing it holds is its [`HppConfig`], so
/// one instance can serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct HppGuard {
    config: HppConfig,
}

impl HppGuard {
    /// Create a guard.
    pub fn new(config: HppConfig) -> Self {
        if config.uses_placeholder_body_accessor() {
            tracing::warn!(
                "HPP body checking enabled without a body accessor; \
                 the default reads the URL query, not the request body"
            );
        }
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &HppConfig {
        &self.config
    }

    /// Collapse the enabled parameter sources into `req.params_mut()`.
    ///
    /// A source whose raw string is empty, or a body that fails the
    /// POST/form gates, leaves its field `None`. Accessor and decoding
    /// errors propagate; fields set before the error stay set.
    pub fn apply(&self, req: &mut Request) -> Result<()> {
        if !self.config.check_query && !self.config.check_body {
            return Ok(());
        }

        if self.config.check_query {
            let raw = (self.config.access_query)(req)?;
            if !raw.is_empty() {
                let collapsed = collapse_counted(&raw)?;
                log_collapsed("query", collapsed.pairs, collapsed.overwritten());
                req.params_mut().query = Some(collapsed.params);
            }
        }

        if self.config.check_body {
            if !Self::is_form_post(req) {
                tracing::trace!(
                    method = %req.method(),
                    content_type = req.content_type().unwrap_or(""),
                    "HPP body check skipped"
                );
                return Ok(());
            }

            let raw = (self.config.access_body)(req)?;
            if !raw.is_empty() {
                let collapsed = collapse_counted(&raw)?;
                log_collapsed("body", collapsed.pairs, collapsed.overwritten());
                req.params_mut().body = Some(collapsed.params);
            }
        }

        Ok(())
    }

    /// Run [`apply`](Self::apply), then hand the request to `next`.
    ///
    /// `next` is called exactly once on success and never on error.
    pub fn intercept<F, R>(&self, req: &mut Request, next: F) -> Result<R>
    where
        F: FnOnce(&mut Request) -> R,
    {
        self.apply(req)?;
        Ok(next(req))
    }

    /// Body gates: POST (any case) with a form-urlencoded Content-Type.
    #[inline]
    fn is_form_post(req: &Request) -> bool {
        req.is_post() && is_form_urlencoded(req.content_type())
    }
}

impl Default for HppGuard {
    fn default() -> Self {
        Self::new(HppConfig::default())
    }
}

#[inline]
fn log_collapsed(source: &'static str, pairs: usize, overwritten: usize) {
    if overwritten > 0 {
        tracing::debug!(source, pairs, overwritten, "collapsed repeated parameters");
    } else {
        tracing::trace!(source, pairs, "parameters parsed");
    }
}

impl Middleware for HppGuard {
    fn name(&self) -> &'static str {
        "hpp"
    }

    fn priority(&self) -> i32 {
        -60 // Security: before anything reads parameters
    }

    /// Errors are answered with 400 Bad Request; the chain is the host here.
    fn on_request(&self, mut req: Request, ctx: &mut Context) -> MiddlewareResult {
        match self.apply(&mut req) {
            Ok(()) => MiddlewareResult::Next(req),
            Err(e) => {
                tracing::debug!(
                    request_id = %ctx.request_id,
                    error = %e,
                    "rejecting request with undecodable parameters"
                );
                MiddlewareResult::Stop(Response::bad_request(&e.to_string()))
            }
        }
    }
}

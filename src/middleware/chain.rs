//! Middleware chain for composing multiple middleware.

use std::sync::Arc;

use super::{Middleware, MiddlewareResult};
use crate::core::{Context, Request, Response};

/// An ordered chain of middleware.
///
/// Requests pass through in ascending priority; responses in reverse.
/// Cloning is cheap: middleware are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    /// Create a new empty middleware chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a middleware, keeping the chain sorted by priority.
    ///
    /// Equal priorities keep insertion order.
    pub fn add<M: Middleware + 'static>(self, middleware: M) -> Self {
        self.add_arc(Arc::new(middleware))
    }

    /// Add a middleware wrapped in Arc to the chain.
    pub fn add_arc(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middlewares.push(middleware);
        self.middlewares.sort_by_key(|m| m.priority());
        self
    }

    /// Get the number of middleware in the chain.
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Get middleware names in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.middlewares.iter().map(|m| m.name()).collect()
    }

    /// Run `on_request` of every middleware until one stops the chain.
    pub fn process_request(&self, mut req: Request, ctx: &mut Context) -> MiddlewareResult {
        for mw in &self.middlewares {
            match mw.on_request(req, ctx) {
                MiddlewareResult::Next(r) => req = r,
                MiddlewareResult::Stop(res) => {
                    tracing::debug!(
                        middleware = mw.name(),
                        status = %res.status(),
                        request_id = %ctx.request_id,
                        "middleware short-circuited request"
                    );
                    return MiddlewareResult::Stop(res);
                }
            }
        }
        MiddlewareResult::Next(req)
    }

    /// Run `on_response` of every middleware in reverse order.
    pub fn process_response(&self, mut res: Response, ctx: &Context) -> Response {
        for mw in self.middlewares.iter().rev() {
            res = mw.on_response(res, ctx);
        }
        res
    }

    /// Full cycle: request middleware, handler, response middleware.
    ///
    /// The handler is skipped when a middleware short-circuits, but the
    /// response still goes through `process_response`.
    pub fn process<F>(&self, req: Request, ctx: &mut Context, handler: F) -> Response
    where
        F: FnOnce(Request, &mut Context) -> Response,
    {
        let res = match self.process_request(req, ctx) {
            MiddlewareResult::Next(req) => handler(req, ctx),
            MiddlewareResult::Stop(res) => res,
        };
        self.process_response(res, ctx)
    }
}

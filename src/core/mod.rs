//! Core types for HTTP request/response handling.
//!
//! This module provides the fundamental types used throughout the middleware
//! pipeline and request handlers:
//!
//! - [`Request`] - HTTP request abstraction carrying [`ParsedParams`]
//! - [`Response`] - HTTP response abstraction with builder pattern
//! - [`Context`] - Request context for middleware communication
//! - [`Error`] - Core error types
//!
//! # Example
//!
//! ```
//! use hpp_guard::core::{Request, Response};
//!
//! fn handle_request(req: &Request) -> Response {
//!     match req.params().query.as_ref().and_then(|q| q.get("user")) {
//!         Some(user) => Response::ok(format!("hello {}", user)),
//!         None => Response::bad_request("missing user"),
//!     }
//! }
//! ```

mod context;
mod error;
mod request;
mod response;

pub use context::{generate_request_id, Context};
pub use error::{Error, Result};
pub use request::Request;
pub use response::{Response, ResponseBuilder};

pub use crate::types::{ParamMap, ParsedParams};

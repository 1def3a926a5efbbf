//! hpp_guard - HTTP Parameter Pollution defence for request pipelines.
//!
//! A request may carry the same parameter name more than once
//! (`?role=user&role=admin`). Different layers of a stack disagree on which
//! occurrence wins, and attackers exploit that disagreement. This crate
//! settles it once: every parameter keeps exactly its **last** value.
//!
//! # Features
//!
//! - **Collapsing**: [`params::collapse`] parses a query string or form body
//!   into a last-value-wins map
//! - **Classification**: [`params::is_form_urlencoded`] decides whether a
//!   body is an HTML form submission
//! - **Middleware**: [`HppGuard`] runs both in a request pipeline and
//!   attaches the result to [`core::Request::params`]
//! - **Pluggable sources**: where the raw query and body come from is
//!   configurable per guard
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use http::{HeaderMap, Method};
//! use hpp_guard::core::Request;
//! use hpp_guard::{HppConfig, HppGuard};
//!
//! let guard = HppGuard::new(HppConfig::new());
//! let mut req = Request::new(
//!     Method::GET,
//!     "/account?role=user&role=admin".parse().unwrap(),
//!     HeaderMap::new(),
//!     Bytes::new(),
//! );
//!
//! guard.apply(&mut req)?;
//!
//! let role = req.params().query.as_ref().and_then(|q| q.get("role"));
//! assert_eq!(role.map(String::as_str), Some("admin"));
//! # Ok::<(), hpp_guard::Error>(())
//! ```
//!
//! The `hpp_guard` binary wraps the guard in a small echo server
//! (see [`server`]) that answers with the collapsed parameters.

/// Package version from Cargo.toml
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git commit hash (8 chars) with optional "-dirty" suffix
pub const BUILD_VERSION: &str = env!("BUILD_VERSION");

/// Full version string: "0.1.0 (abc12345)" or "0.1.0 (abc12345-dirty)"
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_VERSION"), ")");

pub mod config;
pub mod core;
pub mod logging;
pub mod middleware;
pub mod params;
pub mod server;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use crate::core::{Error, Result};
pub use middleware::{HppConfig, HppGuard, MiddlewareChain};
pub use params::{collapse, is_form_urlencoded};
pub use types::{ParamMap, ParsedParams};

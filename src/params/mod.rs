//! Parameter parsing for HTTP Parameter Pollution defence.
//!
//! - [`collapse`] turns a raw query string or form body into a [`ParamMap`]
//!   keeping only the last value of every key
//! - [`is_form_urlencoded`] decides whether a body is a form submission
//!
//! Both are pure, synchronous functions with no shared state.
//!
//! [`ParamMap`]: crate::types::ParamMap

mod collapse;
mod content_type;

pub use collapse::{collapse, collapse_counted, to_query_string, Collapsed};
pub use content_type::{is_form_urlencoded, media_type, FORM_URLENCODED};

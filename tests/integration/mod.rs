//! Integration tests for hpp_guard
//!
//! Each test starts the echo server in-process on an ephemeral port and
//! talks to it over real HTTP.
//!
//! Run with: cargo test --test integration

mod helpers;

mod body_params;
mod query_params;
mod server_limits;

//! Request context for the middleware pipeline.

use std::cell::Cell;
use std::net::IpAddr;
use std::time::Instant;

/// Request-scoped data shared across middleware and the handler.
///
/// A context is created per request and dropped with it; nothing here
/// outlives a single request.
pub struct Context {
    /// Client IP address.
    pub client_ip: IpAddr,

    /// Request ID for log correlation (16 hex chars unless supplied by the client).
    pub request_id: String,

    /// Request start time.
    pub started_at: Instant,
}

impl Context {
    /// Create a new context.
    #[inline]
    pub fn new(client_ip: IpAddr, request_id: impl Into<String>) -> Self {
        Self {
            client_ip,
            request_id: request_id.into(),
            started_at: Instant::now(),
        }
    }

    /// Create a context with a freshly generated request ID.
    #[inline]
    pub fn with_generated_id(client_ip: IpAddr) -> Self {
        Self::new(client_ip, generate_request_id())
    }

    /// Get elapsed time in milliseconds.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64() * 1000.0
    }
}

// ============================================================================
// Fast random ID generation with thread-local state
// ============================================================================

thread_local! {
    static RNG_STATE: Cell<u64> = Cell::new(init_rng_seed());
}

/// Initialize RNG seed from system entropy.
fn init_rng_seed() -> u64 {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};
    use std::time::{SystemTime, UNIX_EPOCH};

    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u64(
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64,
    );
    // xorshift must never start from zero
    hasher.finish() | 1
}

/// Fast random u64 using thread-local xorshift64.
#[inline]
fn rand_u64() -> u64 {
    RNG_STATE.with(|state| {
        let mut x = state.get();
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        state.set(x);
        x
    })
}

/// Generate a random request ID (16 hex chars).
pub fn generate_request_id() -> String {
    use std::fmt::Write;

    let mut id = String::with_capacity(16);
    let _ = write!(id, "{:016x}", rand_u64());
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_context_new() {
        let ctx = Context::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), "req-1");

        assert_eq!(ctx.client_ip.to_string(), "127.0.0.1");
        assert_eq!(ctx.request_id, "req-1");
        assert!(ctx.elapsed_ms() >= 0.0);
    }

    #[test]
    fn test_generated_request_ids() {
        let a = generate_request_id();
        let b = generate_request_id();

        assert_eq!(a.len(), 16);
        assert_eq!(b.len(), 16);
        assert_ne!(a, b);

        let ctx = Context::with_generated_id(IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(ctx.request_id.len(), 16);
    }
}

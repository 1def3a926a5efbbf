//! Echo server: runs the middleware chain and answers with the collapsed parameters.
//!
//! Every request gets its body buffered (up to a limit), passes through the
//! [`MiddlewareChain`], and is answered with
//! `{"query": {...} | null, "body": {...} | null}`.
//!
//! Useful for trying out the guard against real clients:
//!
//! ```text
//! $ curl 'localhost:8080/?role=user&role=admin'
//! {"query":{"role":"admin"},"body":null}
//! ```

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming as IncomingBody;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::config::ServerConfig;
use crate::core::{Context, Request, Response};
use crate::middleware::MiddlewareChain;

/// Boxed error type used by the server entry points.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// HTTP/1.1 echo server.
pub struct EchoServer {
    config: ServerConfig,
    chain: MiddlewareChain,
}

impl EchoServer {
    /// Create a server; nothing is bound until [`run`](Self::run).
    pub fn new(config: ServerConfig, chain: MiddlewareChain) -> Self {
        Self { config, chain }
    }

    /// Bind the configured address and serve until the listener fails.
    pub async fn run(&self) -> Result<(), BoxError> {
        let listener = TcpListener::bind(self.config.listen_addr).await?;
        info!(
            addr = %self.config.listen_addr,
            middleware = ?self.chain.names(),
            "Echo server listening"
        );
        serve(listener, self.chain.clone(), self.config.max_body_size).await
    }
}

/// Accept connections from `listener` forever.
///
/// Exposed separately so callers can bind an ephemeral port themselves.
/// Failed accepts are logged and skipped, so this only returns if the
/// runtime shuts down.
pub async fn serve(
    listener: TcpListener,
    chain: MiddlewareChain,
    max_body_size: usize,
) -> Result<(), BoxError> {
    let chain = Arc::new(chain);

    loop {
        let Some((stream, remote_addr)) = accepted(listener.accept().await) else {
            continue;
        };
        let _ = stream.set_nodelay(true);
        let chain = Arc::clone(&chain);

        tokio::spawn(async move {
            let service = service_fn(move |req| {
                let chain = Arc::clone(&chain);
                async move {
                    Ok::<_, Infallible>(handle_request(req, remote_addr, &chain, max_body_size).await)
                }
            });

            let io = TokioIo::new(stream);
            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                debug!(peer = %remote_addr, error = %e, "connection closed with error");
            }
        });
    }
}

/// Unwrap an accept result; failures (EMFILE, ECONNABORTED) are logged and skipped.
fn accepted<T>(result: std::io::Result<T>) -> Option<T> {
    match result {
        Ok(conn) => Some(conn),
        Err(e) => {
            error!(error = %e, "Accept error");
            None
        }
    }
}

/// Buffer the body, run the chain, log the access line.
async fn handle_request(
    req: hyper::Request<IncomingBody>,
    remote_addr: SocketAddr,
    chain: &MiddlewareChain,
    max_body_size: usize,
) -> hyper::Response<Full<Bytes>> {
    let (parts, body) = req.into_parts();
    let method = parts.method.clone();
    let path = parts.uri.path().to_string();

    let res = match Limited::new(body, max_body_size).collect().await {
        Ok(collected) => {
            let request = Request::from(http::Request::from_parts(parts, collected.to_bytes()));
            let mut ctx = create_context(&request, remote_addr.ip());
            let res = chain
                .process(request, &mut ctx, |req, _ctx| echo(req))
                .with_header("x-request-id", &ctx.request_id);
            log_access(&method, &path, &res, &ctx);
            res
        }
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            debug!(peer = %remote_addr, limit = max_body_size, "request body too large");
            Response::payload_too_large()
        }
        Err(e) => {
            debug!(peer = %remote_addr, error = %e, "failed to read request body");
            Response::bad_request("failed to read request body")
        }
    };

    http::Response::<Bytes>::from(res).map(Full::new)
}

/// Reuse the client's X-Request-ID when present.
fn create_context(req: &Request, client_ip: IpAddr) -> Context {
    match req.request_id() {
        Some(id) => Context::new(client_ip, id),
        None => Context::with_generated_id(client_ip),
    }
}

/// Handler: serialize whatever the guard attached to the request.
pub fn echo(req: Request) -> Response {
    match serde_json::to_vec(req.params()) {
        Ok(json) => Response::json(json),
        Err(e) => {
            error!(error = %e, "failed to serialize parameters");
            Response::builder()
                .status(http::StatusCode::INTERNAL_SERVER_ERROR)
                .text()
                .body("Internal Server Error")
                .build()
        }
    }
}

fn log_access(method: &http::Method, path: &str, res: &Response, ctx: &Context) {
    info!(
        target: "access",
        method = %method,
        path = path,
        status = res.status().as_u16(),
        duration_ms = ctx.elapsed_ms(),
        ip = %ctx.client_ip,
        request_id = %ctx.request_id,
    );
}

//! Test helpers and utilities

use std::net::SocketAddr;
use std::time::Duration;

use hpp_guard::config::{HppSettings, DEFAULT_MAX_BODY_SIZE};
use hpp_guard::middleware::{HppGuard, MiddlewareChain};
use hpp_guard::server::serve;
use reqwest::{Client, Response, StatusCode};
use tokio::net::TcpListener;

/// In-process echo server bound to 127.0.0.1 on a random port
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
}

#[allow(dead_code)]
impl TestServer {
    /// Start a server with the default guard settings
    pub async fn start() -> Self {
        Self::start_with(HppSettings::default()).await
    }

    /// Start a server with custom guard settings
    pub async fn start_with(settings: HppSettings) -> Self {
        Self::start_with_limit(settings, DEFAULT_MAX_BODY_SIZE).await
    }

    /// Start a server with custom guard settings and body size limit
    pub async fn start_with_limit(settings: HppSettings, max_body_size: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr: SocketAddr = listener.local_addr().expect("No local address");

        let chain = MiddlewareChain::new().add(HppGuard::new(settings.to_guard_config()));
        tokio::spawn(async move {
            let _ = serve(listener, chain, max_body_size).await;
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: format!("http://{}", addr),
            client,
        }
    }

    /// Make a GET request to the server
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// Make a POST request with a raw body and content type
    pub async fn post_raw(&self, path: &str, content_type: &str, body: &str) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header("content-type", content_type)
            .body(body.to_string())
            .send()
            .await
            .expect("POST request failed")
    }

    /// Make a POST request with an urlencoded form body
    pub async fn post_form(&self, path: &str, body: &str) -> Response {
        self.post_raw(path, "application/x-www-form-urlencoded", body)
            .await
    }

    /// Make a request with an arbitrary method
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        content_type: &str,
        body: &str,
    ) -> Response {
        let method = reqwest::Method::from_bytes(method.as_bytes()).expect("Invalid method");
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header("content-type", content_type)
            .body(body.to_string())
            .send()
            .await
            .expect("Request failed")
    }
}

/// Assert that response has expected status
pub fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(
        response.status(),
        expected,
        "Expected status {}, got {}",
        expected,
        response.status()
    );
}

/// Read the echoed parameters
pub async fn echoed(response: Response) -> serde_json::Value {
    assert_status(&response, StatusCode::OK);
    response.json().await.expect("Body is not JSON")
}

/// Assert that response body contains substring
pub async fn assert_body_contains(response: Response, substring: &str) {
    let body = response.text().await.expect("Failed to read body");
    assert!(
        body.contains(substring),
        "Body does not contain '{}'. Body: {}",
        substring,
        &body[..body.len().min(500)]
    );
}

/// Assert that response contains header
pub fn assert_header(response: &Response, name: &str, expected: &str) {
    let value = response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("Header '{}' not found", name))
        .to_str()
        .unwrap();
    assert_eq!(value, expected, "Header '{}' mismatch", name);
}

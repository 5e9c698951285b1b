//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use portfolio_api::{create_app, create_app_state};
use portfolio_common::AppConfig;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Admin token used when `ADMIN_TOKEN` is not set
pub const TEST_ADMIN_TOKEN: &str = "integration-admin-token";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub admin_token: String,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let admin_token = config.admin.token.clone();

        let state = create_app_state(config).await?;
        let app = create_app(state);

        // Ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            admin_token,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn admin(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.admin_token)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request as the given viewer
    pub async fn get_as(&self, path: &str, viewer: &Viewer) -> Result<Response> {
        Ok(viewer.apply(self.client.get(self.url(path))).send().await?)
    }

    /// POST a reaction as the given viewer
    pub async fn react(&self, post_id: &str, emoji: &str, viewer: &Viewer) -> Result<Response> {
        let url = self.url(&format!("/api/v1/posts/{post_id}/reactions/{emoji}"));
        Ok(viewer.apply(self.client.post(url)).send().await?)
    }

    /// Make an admin GET request
    pub async fn admin_get(&self, path: &str) -> Result<Response> {
        Ok(self.admin(self.client.get(self.url(path))).send().await?)
    }

    /// Make an admin POST request with JSON body
    pub async fn admin_post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self
            .admin(self.client.post(self.url(path)))
            .json(body)
            .send()
            .await?)
    }

    /// Make an admin PATCH request with JSON body
    pub async fn admin_patch<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self
            .admin(self.client.patch(self.url(path)))
            .json(body)
            .send()
            .await?)
    }

    /// Make an admin DELETE request
    pub async fn admin_delete(&self, path: &str) -> Result<Response> {
        Ok(self.admin(self.client.delete(self.url(path))).send().await?)
    }

    /// Make a POST request with an arbitrary bearer token
    pub async fn post_with_token(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }
}

/// Identity a request presents: forwarded address plus user agent
#[derive(Debug, Clone)]
pub struct Viewer {
    pub address: String,
    pub user_agent: String,
}

impl Viewer {
    pub fn new(address: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            user_agent: user_agent.into(),
        }
    }

    /// A viewer no other test uses
    pub fn unique() -> Self {
        let n = crate::fixtures::unique_suffix();
        Self::new(
            format!("10.{}.{}.{}", (n >> 16) & 0xff, (n >> 8) & 0xff, n & 0xff),
            format!("integration-agent/{n}"),
        )
    }

    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("X-Forwarded-For", &self.address)
            .header("User-Agent", &self.user_agent)
    }
}

/// Create a test configuration from the environment, filling in what
/// the test run does not need to provide
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_lookup(|key| {
        std::env::var(key).ok().or_else(|| match key {
            "API_PORT" => Some("0".to_string()),
            "ADMIN_TOKEN" => Some(TEST_ADMIN_TOKEN.to_string()),
            "RATE_LIMIT_REQUESTS_PER_SECOND" | "RATE_LIMIT_BURST" => Some("10000".to_string()),
            _ => None,
        })
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// Assert an error response and return its code
pub async fn assert_error_code(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    body["error"]["code"]
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| anyhow::anyhow!("Missing error code in {body}"))
}

//! HTTP client for the inventory backend's collection endpoints.

use reqwest::Client;
use serde_json::Value;

use crate::config::AppConfig;
use crate::errors::AppError;

pub const INGREDIENTS_PATH: &str = "/ingredients";
pub const RECIPES_PATH: &str = "/recipes";
pub const PRODUCTION_PATH: &str = "/production";

/// Shared client; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: &str, http: Client) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client honouring the configured request timeout.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.upstream_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self::new(&config.upstream_api_url, http))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a collection endpoint and return the raw JSON body.
    ///
    /// The body is not shape-checked here; a non-2xx status is an error.
    pub async fn get_collection(&self, path: &str, token: &str) -> Result<Value, AppError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "Fetching upstream collection");

        let response = self.http.get(&url).bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json::<Value>().await?)
    }

    pub async fn ingredients(&self, token: &str) -> Result<Value, AppError> {
        self.get_collection(INGREDIENTS_PATH, token).await
    }

    pub async fn recipes(&self, token: &str) -> Result<Value, AppError> {
        self.get_collection(RECIPES_PATH, token).await
    }

    pub async fn production_logs(&self, token: &str) -> Result<Value, AppError> {
        self.get_collection(PRODUCTION_PATH, token).await
    }

    /// Reachability probe: any HTTP response counts as reachable.
    pub async fn ping(&self) -> Result<u16, AppError> {
        let response = self.http.get(&self.base_url).send().await?;
        Ok(response.status().as_u16())
    }
}

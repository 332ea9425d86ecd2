use http::{header, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AppError, Result};

/// HTTP client for the clinic REST API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the API rooted at `base_url` (e.g. `http://localhost:8086/api`).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> reqwest::RequestBuilder {
        tracing::debug!("➡️ {} {}", method, path);

        let builder = self
            .http
            .request(method, self.url(path))
            .header(header::ACCEPT, "application/json");

        match token {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Sends a request without a body and returns the raw response text.
    pub(crate) async fn get_text(
        &self,
        path: &str,
        token: Option<&str>,
        fallback: &str,
    ) -> Result<String> {
        let builder = self.request(Method::GET, path, token);
        self.execute(builder, path, fallback).await
    }

    /// Sends a request without a body and decodes the JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        fallback: &str,
    ) -> Result<T> {
        let raw = self.get_text(path, token, fallback).await?;
        Ok(sonic_rs::from_str(&raw)?)
    }

    /// Sends `body` as JSON and returns the raw response text.
    pub(crate) async fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: &B,
        fallback: &str,
    ) -> Result<String> {
        let payload = sonic_rs::to_string(body)?;
        let builder = self
            .request(method, path, token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(payload);

        self.execute(builder, path, fallback).await
    }

    async fn execute(
        &self,
        builder: reqwest::RequestBuilder,
        path: &str,
        fallback: &str,
    ) -> Result<String> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("❌ {} unreachable: {}", path, e);
            AppError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!("❌ {} answered {}", path, status);
            let message = if body.trim().is_empty() {
                fallback.to_string()
            } else {
                body
            };
            return Err(AppError::Application {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!("✅ {} answered {}", path, status);
        Ok(body)
    }
}

//! HTTP client for the external prediction service.
//!
//! Every call is a single attempt. A response is either returned as the raw
//! JSON bytes (2xx) or turned into [`GatewayError::Upstream`] (non-2xx).
//! Anything unreadable becomes a transport-class error.

use axum::body::Bytes;
use serde::de::IgnoredAny;
use serde_json::Value;
use tracing::debug;

use crate::config_loader::GatewayConfig;
use crate::errors::{GatewayError, GatewayResult};

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.prediction_api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST `body` as JSON to `path`.
    pub async fn post_json(&self, path: &str, body: &Value) -> GatewayResult<Bytes> {
        debug!(path, "forwarding POST to prediction service");
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::transport(path, e))?;
        read_json_body(path, resp).await
    }

    /// GET `path` with query parameters.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> GatewayResult<Bytes> {
        debug!(path, ?query, "forwarding GET to prediction service");
        let resp = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| GatewayError::transport(path, e))?;
        read_json_body(path, resp).await
    }

    /// Body of the service's `/health` endpoint.
    pub async fn health(&self) -> GatewayResult<Value> {
        let bytes = self.get("/health", &[]).await?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::malformed("/health", e))
    }
}

pub(crate) async fn read_json_body(path: &str, resp: reqwest::Response) -> GatewayResult<Bytes> {
    let status = resp.status();
    let bytes = resp
        .bytes()
        .await
        .map_err(|e| GatewayError::transport(path, e))?;

    if status.is_success() {
        serde_json::from_slice::<IgnoredAny>(&bytes)
            .map_err(|e| GatewayError::malformed(path, e))?;
        return Ok(bytes);
    }

    let body: Value =
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::malformed(path, e))?;
    Err(GatewayError::upstream(status, error_message(&body)))
}

/// The `error` string of an error body, if present and non-empty.
pub fn error_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_message_requires_non_empty_string() {
        assert_eq!(error_message(&json!({"error": "Backend error"})).as_deref(), Some("Backend error"));
        assert_eq!(error_message(&json!({"error": ""})), None);
        assert_eq!(error_message(&json!({"error": 42})), None);
        assert_eq!(error_message(&json!({"message": "nope"})), None);
    }

    #[test]
    fn base_url_is_trimmed() {
        let config = GatewayConfig {
            prediction_api_url: "http://ml:5000/".into(),
            ..GatewayConfig::default()
        };
        let client = UpstreamClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://ml:5000");
        assert_eq!(client.url("/predict"), "http://ml:5000/predict");
    }
}

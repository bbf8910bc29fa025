//! Client for the gateway's own endpoints, as the dashboard uses them.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::{GatewayError, GatewayResult};
use crate::prediction::{PredictionResult, TestDataset, TestMetrics};
use crate::reservoir::ReservoirFeatures;
use crate::upstream::read_json_body;

/// Anything that can turn features into a prediction.
pub trait PredictionApi {
    fn predict(
        &self,
        features: &ReservoirFeatures,
    ) -> impl Future<Output = GatewayResult<PredictionResult>> + Send;
}

#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    gateway_url: String,
}

impl ProxyClient {
    pub fn new(gateway_url: impl Into<String>, timeout: Option<Duration>) -> GatewayResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            gateway_url: gateway_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path, "POST to gateway");
        let resp = self
            .client
            .post(format!("{}{}", self.gateway_url, path))
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::transport(path, e))?;
        let bytes = read_json_body(path, resp).await?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::malformed(path, e))
    }

    /// `GET /api/test?action=load-data&limit=N`
    pub async fn load_test_data(&self, limit: u32) -> GatewayResult<TestDataset> {
        let path = "/api/test";
        let resp = self
            .client
            .get(format!("{}{}", self.gateway_url, path))
            .query(&[("action", "load-data".to_string()), ("limit", limit.to_string())])
            .send()
            .await
            .map_err(|e| GatewayError::transport(path, e))?;
        let bytes = read_json_body(path, resp).await?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::malformed(path, e))
    }

    pub async fn evaluate(&self, dataset: &TestDataset) -> GatewayResult<TestMetrics> {
        let body = json!({
            "action": "evaluate",
            "test_cases": dataset.test_cases,
            "actual_labels": dataset.actual_labels,
        });
        self.post("/api/test", &body).await
    }

    /// Batch predictions come back in whatever shape the service uses.
    pub async fn batch_predict(&self, cases: &[ReservoirFeatures]) -> GatewayResult<Value> {
        let body = json!({ "action": "batch-predict", "test_cases": cases });
        self.post("/api/test", &body).await
    }
}

impl PredictionApi for ProxyClient {
    async fn predict(&self, features: &ReservoirFeatures) -> GatewayResult<PredictionResult> {
        self.post("/api/predict", features).await
    }
}

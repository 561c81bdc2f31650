// src/transport/http.rs

use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Instant;

use crate::config::PredictionServiceConfig;
use crate::errors::{PredictError, Result};
use crate::models::{PredictionRequest, PredictionResponse, UpstreamHealth};
use crate::transport::PredictionTransport;

/// Talks JSON over HTTP to the prediction service.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    config: PredictionServiceConfig,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

impl HttpTransport {
    pub fn new(client: Client, config: PredictionServiceConfig) -> Self {
        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Turns a non-2xx response into `PredictError::Api`, keeping the server's message if any.
async fn api_error(resp: Response) -> PredictError {
    let status = resp.status().as_u16();
    let raw = resp.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&raw).unwrap_or_default();

    log::warn!(
        "Prediction service returned {}: {}",
        status,
        body.error.as_deref().unwrap_or("<no error message>")
    );

    PredictError::Api {
        status,
        message: body.error,
        details: body.details,
    }
}

/// Checks for the `results` list before typing the body, so a missing list is
/// reported as such rather than as a generic decode failure.
fn parse_prediction(body: serde_json::Value) -> Result<PredictionResponse> {
    match body.get("results") {
        Some(serde_json::Value::Array(_)) => serde_json::from_value(body)
            .map_err(|e| PredictError::MalformedResponse(format!("invalid result entry: {}", e))),
        Some(other) => Err(PredictError::MalformedResponse(format!(
            "`results` is not a list: {}",
            other
        ))),
        None => Err(PredictError::MalformedResponse(format!(
            "missing `results` in {}",
            body
        ))),
    }
}

impl PredictionTransport for HttpTransport {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse> {
        let url = self.url("/predict");

        log::info!("📡 Requesting prediction from {}", url);

        let start = Instant::now();
        let resp = self.client.post(&url).json(request).send().await?;

        let status = resp.status();
        let latency_ms = start.elapsed().as_millis() as u64;

        log::info!("📥 Prediction response status: {} ({}ms)", status, latency_ms);

        if !status.is_success() {
            return Err(api_error(resp).await);
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| PredictError::MalformedResponse(format!("body is not JSON: {}", e)))?;

        let response = parse_prediction(body)?;
        log::debug!("Received {} candidates", response.results.len());
        Ok(response)
    }

    async fn health(&self) -> Result<UpstreamHealth> {
        let url = self.url("/health");
        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        let raw = resp.text().await?;
        Ok(serde_json::from_str(&raw)?)
    }
}

// src/transport/mod.rs

use crate::errors::Result;
use crate::models::{PredictionRequest, PredictionResponse, UpstreamHealth};

pub mod http;

pub use http::HttpTransport;

/// The network boundary to the remote prediction service.
///
/// One call per invocation: no retries, no timeout override, no caching.
/// Implementations classify every failure into a `PredictError` so callers
/// never see a panic for a bad payload.
pub trait PredictionTransport: Send + Sync {
    /// Sends the request to `POST /predict`.
    fn predict(
        &self,
        request: &PredictionRequest,
    ) -> impl std::future::Future<Output = Result<PredictionResponse>> + Send;

    /// Reads the service's `GET /health` report.
    fn health(&self) -> impl std::future::Future<Output = Result<UpstreamHealth>> + Send;
}

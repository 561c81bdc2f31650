// src/api/handlers/health.rs
use actix_web::{web, HttpResponse, Result};
use serde_json::json;

use crate::api::AppState;
use crate::models::ApiError;
use crate::transport::PredictionTransport;

pub async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "symptom-gateway",
        "version": env!("CARGO_PKG_VERSION")
    })))
}

/// Reports whether the prediction service is up and has its model loaded.
pub async fn upstream_health(state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.transport.health().await {
        Ok(health) => Ok(HttpResponse::Ok().json(json!({
            "ready": health.is_ready(),
            "upstream": health
        }))),
        Err(e) => {
            log::warn!("Upstream health check failed: {}", e);
            Ok(HttpResponse::BadGateway().json(ApiError { message: e.to_string() }))
        }
    }
}

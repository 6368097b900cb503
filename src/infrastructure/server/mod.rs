//! HTTP surface for the stateless inference endpoint

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::application::errors::BotError;
use crate::application::services::BatteryService;

/// Router for health and prediction
pub fn router(service: Arc<BatteryService>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/predict", post(predict_handler))
        .with_state(service)
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn predict_handler(State(service): State<Arc<BatteryService>>, body: Bytes) -> impl IntoResponse {
    let response = service.handle_body(&body);
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_REQUEST);
    (status, Json(response))
}

/// Bind and serve until the process exits
pub async fn serve(service: Arc<BatteryService>, bind: &str) -> Result<(), BotError> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("Inference endpoint listening on {}", bind);
    axum::serve(listener, router(service)).await?;
    Ok(())
}

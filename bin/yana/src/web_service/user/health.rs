use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::json;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "version": VERSION,
        "provider": "Gree HVAC",
    }))
}

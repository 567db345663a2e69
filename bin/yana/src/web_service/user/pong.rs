use axum::http::StatusCode;
use axum::response::IntoResponse;

pub async fn pong() -> impl IntoResponse {
    StatusCode::OK
}

use axum::{
    extract::{Query, State},
    http::{header::LOCATION, HeaderMap, StatusCode},
    response::IntoResponse,
};
use log::info;
use serde::Deserialize;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AuthorizeParams {
    state: Option<String>,
}

pub async fn authorize(
    State(app): State<AppState>,
    Query(params): Query<AuthorizeParams>,
) -> impl IntoResponse {
    let url = app
        .yandex
        .authorize_url(params.state.as_deref().unwrap_or("default"));

    info!("redirecting to {url}");

    let mut headers = HeaderMap::new();
    headers.insert(LOCATION, url.as_str().parse().unwrap());

    (StatusCode::FOUND, headers)
}

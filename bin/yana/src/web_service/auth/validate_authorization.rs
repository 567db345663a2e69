use axum::{
    body::Body,
    http::{HeaderMap, Response, StatusCode},
    response::IntoResponse,
};
use log::{error, trace};

use crate::token_store::{TokenError, TokenStore};

pub enum ValidationError {
    Expired,
    Invalid,
    NoToken,
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response<Body> {
        let description = match self {
            ValidationError::Expired => "The access token has expired",
            ValidationError::Invalid => "The access token is not recognized",
            ValidationError::NoToken => "No access token has been provided",
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            "WWW-Authenticate",
            format!("Bearer error=\"invalid_token\" error_description=\"{description}\"")
                .parse()
                .unwrap(),
        );

        (StatusCode::UNAUTHORIZED, headers).into_response()
    }
}

pub async fn validate_authorization(
    headers: &HeaderMap,
    tokens: &TokenStore,
    request_name: &'static str,
) -> Result<String, ValidationError> {
    match extract_token_from_headers(headers) {
        Some(token) => match tokens.validate(token).await {
            Ok(user_id) => {
                trace!(target: request_name, "received a valid access token");
                Ok(user_id)
            }
            Err(TokenError::Expired) => {
                error!(
                    target: request_name,
                    "an expired access token has been provided"
                );

                Err(ValidationError::Expired)
            }
            Err(TokenError::Unknown) => {
                error!(
                    target: request_name,
                    "an unknown access token has been provided"
                );

                Err(ValidationError::Invalid)
            }
        },
        None => Err(ValidationError::NoToken),
    }
}

const BEARER: &str = "Bearer ";

pub fn extract_token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let authorization = headers.get("Authorization")?;
    let authorization = std::str::from_utf8(authorization.as_bytes()).ok()?;
    authorization.strip_prefix(BEARER)
}

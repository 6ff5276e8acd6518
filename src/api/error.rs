use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::db::store::StoreError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("User already registered")]
    AlreadyRegistered,

    #[error("{0}")]
    InvalidBody(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::AlreadyRegistered => (
                StatusCode::BAD_REQUEST,
                ApiError::AlreadyRegistered.to_string(),
            ),
            ApiError::InvalidBody(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Store(e) => {
                tracing::error!("store failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Fatal errors raised while bringing the server up.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to initialize database: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to bind to port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("Server failed: {0}")]
    Serve(#[source] std::io::Error),
}

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// A store failure. `expose` decides whether the store's own message
    /// reaches the client.
    #[error("{source}")]
    Store { source: StoreError, expose: bool },

    #[error("{0}")]
    NotFound(&'static str),

    /// The request body could not be read as the expected JSON shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::NotFound("Not found")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Store { source, expose } => {
                let message = match source {
                    StoreError::Unavailable(detail) => {
                        error!("Database connection error: {}", detail);
                        if *expose {
                            source.to_string()
                        } else {
                            "Database connection failed".to_string()
                        }
                    }
                    StoreError::Statement(detail) => {
                        warn!("Database statement error: {}", detail);
                        if *expose {
                            detail.clone()
                        } else {
                            "Database statement failed".to_string()
                        }
                    }
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            ApiError::InvalidBody(msg) => {
                warn!("Rejected request body: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        (status, Json(ErrorResponse::new(&message))).into_response()
    }
}

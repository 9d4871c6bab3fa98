use axum::response::IntoResponse;
use axum::Json;
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::models::UnknownInstrument;
use crate::services::crawl_service::CrawlError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("External error: {0}")]
    External(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::External(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<UnknownInstrument> for AppError {
    fn from(value: UnknownInstrument) -> Self {
        AppError::NotFound(value.to_string())
    }
}

impl From<CrawlError> for AppError {
    fn from(value: CrawlError) -> Self {
        AppError::External(format!("Failed to crawl gold price: {}", value))
    }
}

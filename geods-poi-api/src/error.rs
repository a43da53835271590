use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geods_poi_core::search::PoiSearchError;
use serde::Serialize;

const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred";

#[derive(thiserror::Error, Debug)]
pub enum PoiApiError {
    #[error("Invalid input: {0}")]
    InvalidUserInput(String),
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Error reading from '{path}': {message}")]
    ReadError { path: PathBuf, message: String },
    #[error("Error creating a runtime to handle async code: {0}")]
    TokioError(String),
    #[error("HTTP API server failure: {0}")]
    ServerError(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Failed to fetch image: {0}")]
    ImageFetchError(String),
    #[error(transparent)]
    Search(#[from] PoiSearchError),
}

/// JSON error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl PoiApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PoiApiError::InvalidUserInput(_) => StatusCode::BAD_REQUEST,
            PoiApiError::Search(e) if e.is_user_error() => StatusCode::BAD_REQUEST,
            PoiApiError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// message safe to show to the caller. internal failures are replaced
    /// by a generic message.
    pub fn public_message(&self) -> String {
        match self {
            PoiApiError::InvalidUserInput(msg) | PoiApiError::NotFound(msg) => msg.clone(),
            PoiApiError::Search(e) if e.is_user_error() => e.to_string(),
            PoiApiError::ImageFetchError(_) => String::from("failed to fetch image"),
            _ => String::from(INTERNAL_ERROR_MESSAGE),
        }
    }
}

impl IntoResponse for PoiApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{self}");
        } else {
            log::debug!("rejected request ({status}): {self}");
        }
        let body = ErrorResponse {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for PoiApiError {
    fn from(e: sqlx::Error) -> Self {
        PoiApiError::DatabaseError(e.to_string())
    }
}

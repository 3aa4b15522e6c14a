use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse, ResponseError,
};
use log::error;
use serde_json::json;
use thiserror::Error;

use crate::services::completion_service::CompletionError;
use crate::services::itinerary_service::RepositoryError;

/// Errors a route handler can return. Each renders as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Itinerary not found")]
    NotFound,
    #[error("Failed to generate itinerary. Please try again.")]
    GenerationFailed(#[source] CompletionError),
    #[error("Internal server error")]
    Repository(#[from] RepositoryError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::GenerationFailed(_) | ApiError::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::GenerationFailed(err) => error!("Error generating itinerary: {}", err),
            ApiError::Repository(err) => error!("Database error: {}", err),
            _ => {}
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

impl From<CompletionError> for ApiError {
    fn from(err: CompletionError) -> Self {
        ApiError::GenerationFailed(err)
    }
}

/// Error handler for `web::JsonConfig` so malformed bodies get the same
/// JSON error shape as every other failure.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = ApiError::BadRequest("Invalid input".to_string()).error_response();
    InternalError::from_response(err, response).into()
}

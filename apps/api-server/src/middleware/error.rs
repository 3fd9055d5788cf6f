//! Error handling - RFC 7807 compliant responses.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use forum_core::DomainError;
use forum_shared::ErrorResponse;
use std::fmt;

use crate::observability::RequestId;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Validation(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::Validation(detail) => ErrorResponse::validation_failed(detail),
            AppError::Internal(detail) => {
                // Log internal errors; the detail stays out of the body
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            err @ DomainError::NotFound { .. } => AppError::NotFound(err.to_string()),
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Persistence(msg) => AppError::Internal(msg),
        }
    }
}

/// Turn JSON body extraction failures into problem-details 400 responses.
///
/// Registered through `web::JsonConfig::error_handler`.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let mut body = ErrorResponse::bad_request(err.to_string()).with_instance(req.path());
    if let Some(request_id) = req.extensions().get::<RequestId>() {
        body = body.with_request_id(request_id.as_str());
    }

    tracing::debug!(path = %req.path(), "Rejected request body: {}", err);

    let response = HttpResponse::BadRequest().json(body);
    InternalError::from_response(err, response).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

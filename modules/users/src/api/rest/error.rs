use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::error::DomainError;

/// JSON error body safe to expose to REST clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// REST-level error: a status code plus an optional body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: Option<ErrorBody>,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: Some(ErrorBody {
                code: "USERS_VALIDATION",
                message: message.into(),
            }),
        }
    }

    /// Empty 404, with no storage-layer detail in the response.
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: None,
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: Some(ErrorBody {
                code: "INTERNAL",
                message: "An internal error occurred".to_string(),
            }),
        }
    }
}

/// Map a domain error to its REST representation
pub fn map_domain_error(e: &DomainError) -> ApiError {
    match e {
        DomainError::UserNotFound { .. } => ApiError::not_found(),
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            ApiError::internal()
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

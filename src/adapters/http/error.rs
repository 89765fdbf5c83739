//! Shared HTTP error payload and status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::checklist::ChecklistError;

/// Uniform error body: a stable machine code plus a human message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Maps a use-case error onto an HTTP response.
///
/// Infrastructure details stay in the logs; clients get a generic message.
pub fn checklist_error_response(err: ChecklistError) -> Response {
    let status = match &err {
        ChecklistError::NotFound(_) | ChecklistError::QuestionNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        ChecklistError::ValidationFailed { .. } | ChecklistError::InvalidAnswer { .. } => {
            StatusCode::BAD_REQUEST
        }
        ChecklistError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!(error = %err, "request failed");
        ErrorResponse::new(err.code().to_string(), "internal error")
    } else {
        ErrorResponse::new(err.code().to_string(), err.message())
    };

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ChecklistId;

    #[test]
    fn not_found_maps_to_404() {
        let response = checklist_error_response(ChecklistError::not_found(ChecklistId::new(7)));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let response =
            checklist_error_response(ChecklistError::validation("label", "cannot be empty"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infrastructure_hides_details() {
        let response =
            checklist_error_response(ChecklistError::infrastructure("connection refused"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

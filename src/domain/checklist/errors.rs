//! Checklist-specific error types.

use crate::domain::foundation::{ChecklistId, DomainError, ErrorCode, QuestionId};

/// Errors surfaced by checklist and question use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecklistError {
    /// Checklist was not found.
    NotFound(ChecklistId),
    /// Question was not found.
    QuestionNotFound(QuestionId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// A submitted answer value is not acceptable for its question.
    InvalidAnswer {
        question_id: QuestionId,
        value: String,
    },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ChecklistError {
    pub fn not_found(id: ChecklistId) -> Self {
        ChecklistError::NotFound(id)
    }

    pub fn question_not_found(id: QuestionId) -> Self {
        ChecklistError::QuestionNotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ChecklistError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_answer(question_id: QuestionId, value: impl Into<String>) -> Self {
        ChecklistError::InvalidAnswer {
            question_id,
            value: value.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ChecklistError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ChecklistError::NotFound(_) => ErrorCode::ChecklistNotFound,
            ChecklistError::QuestionNotFound(_) => ErrorCode::QuestionNotFound,
            ChecklistError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ChecklistError::InvalidAnswer { .. } => ErrorCode::InvalidAnswer,
            ChecklistError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ChecklistError::NotFound(id) => format!("Checklist not found: {}", id),
            ChecklistError::QuestionNotFound(id) => format!("Question not found: {}", id),
            ChecklistError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ChecklistError::InvalidAnswer { question_id, value } => format!(
                "Value '{}' is not acceptable for question {}",
                value, question_id
            ),
            ChecklistError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ChecklistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ChecklistError {}

impl From<DomainError> for ChecklistError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                ChecklistError::ValidationFailed {
                    field: "unknown".to_string(),
                    message: err.to_string(),
                }
            }
            _ => ChecklistError::Infrastructure(err.to_string()),
        }
    }
}

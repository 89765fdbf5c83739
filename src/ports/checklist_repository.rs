//! Checklist repository port (write side).
//!
//! Handles checklist lifecycle: nested creation (steps and questions in one
//! shot), scalar updates and cascading deletion.

use crate::domain::checklist::{AnswerKind, Checklist};
use crate::domain::foundation::{ChecklistId, DomainError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Write model for a new question inside a nested create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestion {
    pub text: String,
    pub kind: AnswerKind,
    #[serde(default)]
    pub required: bool,
    /// Option values; only stored for `SingleSelect` questions.
    #[serde(default)]
    pub options: Vec<String>,
}

/// Write model for a new step inside a nested create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStep {
    pub name: String,
    #[serde(default)]
    pub questions: Vec<NewQuestion>,
}

/// Write model for creating a checklist with its full structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewChecklist {
    pub label: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Vec<NewStep>,
}

/// Scalar fields of a checklist update; steps and questions are managed
/// through the question endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistUpdate {
    pub label: String,
    pub version: String,
    pub description: String,
}

/// Repository port for checklist persistence.
#[async_trait]
pub trait ChecklistRepository: Send + Sync {
    /// Persist a checklist with its nested steps, questions and options.
    ///
    /// Returns the stored structure with database-assigned identifiers.
    async fn create(&self, checklist: &NewChecklist) -> Result<Checklist, DomainError>;

    /// Update the scalar fields of a checklist.
    ///
    /// # Errors
    ///
    /// - `ChecklistNotFound` if the checklist does not exist
    async fn update(
        &self,
        id: ChecklistId,
        update: &ChecklistUpdate,
    ) -> Result<(), DomainError>;

    /// Delete a checklist; the store cascades to steps, questions, options
    /// and submissions.
    ///
    /// # Errors
    ///
    /// - `ChecklistNotFound` if the checklist does not exist
    async fn delete(&self, id: ChecklistId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn checklist_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ChecklistRepository) {}
    }

    #[test]
    fn new_checklist_deserializes_with_defaults() {
        let json = r#"{"label": "CHECK-LIST"}"#;
        let parsed: NewChecklist = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.label, "CHECK-LIST");
        assert!(parsed.steps.is_empty());
        assert!(parsed.version.is_empty());
    }
}

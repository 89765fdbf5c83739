//! Question repository port (write side).
//!
//! Question CRUD plus option reconciliation on update: options absent from
//! the update are removed, kept ones are rewritten, new ones are added, and
//! a kind change away from `SingleSelect` clears the option set entirely.

use crate::domain::checklist::{AnswerKind, Question};
use crate::domain::foundation::{ChecklistId, DomainError, OptionId, QuestionId, StepId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One option in a question update. `id` present means "keep and rewrite",
/// absent means "add".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionUpsert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OptionId>,
    pub value: String,
}

/// Full-state update of a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionUpdate {
    pub text: String,
    pub kind: AnswerKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<OptionUpsert>,
    /// Current fallback answer value; `None` leaves the stored value alone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_answer: Option<String>,
}

/// Repository port for question persistence.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Create a question under an existing step.
    ///
    /// # Errors
    ///
    /// - `StepNotFound` if the step does not exist
    async fn create(
        &self,
        step_id: StepId,
        text: &str,
        kind: AnswerKind,
        required: bool,
        options: &[String],
    ) -> Result<Question, DomainError>;

    /// Fetch a question with its options. Returns `None` if not found.
    async fn find(&self, id: QuestionId) -> Result<Option<Question>, DomainError>;

    /// All questions of a checklist, ordered by step position.
    async fn list_by_checklist(
        &self,
        checklist_id: ChecklistId,
    ) -> Result<Vec<Question>, DomainError>;

    /// All questions of one step.
    async fn list_by_step(&self, step_id: StepId) -> Result<Vec<Question>, DomainError>;

    /// Update a question and reconcile its options.
    ///
    /// # Errors
    ///
    /// - `QuestionNotFound` if the question does not exist
    async fn update(&self, id: QuestionId, update: &QuestionUpdate) -> Result<(), DomainError>;

    /// Delete a question; cascades to its options and submitted answers.
    ///
    /// # Errors
    ///
    /// - `QuestionNotFound` if the question does not exist
    async fn delete(&self, id: QuestionId) -> Result<(), DomainError>;
}

//! CreateQuestionHandler - add a question to an existing step.

use std::sync::Arc;

use crate::domain::checklist::{AnswerKind, ChecklistError, Question};
use crate::domain::foundation::{ErrorCode, StepId};
use crate::ports::QuestionRepository;

pub struct CreateQuestionHandler {
    repository: Arc<dyn QuestionRepository>,
}

impl CreateQuestionHandler {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        step_id: StepId,
        text: String,
        kind: AnswerKind,
        required: bool,
        options: Vec<String>,
    ) -> Result<Question, ChecklistError> {
        if text.trim().is_empty() {
            return Err(ChecklistError::validation("text", "question text cannot be empty"));
        }
        if kind == AnswerKind::SingleSelect && options.is_empty() {
            return Err(ChecklistError::validation(
                "options",
                "single-select questions need at least one option",
            ));
        }
        // Options on non-select kinds are silently dropped by the store.
        self.repository
            .create(step_id, &text, kind, required, &options)
            .await
            .map_err(|e| match e.code {
                ErrorCode::StepNotFound => {
                    ChecklistError::validation("step_id", format!("step {} does not exist", step_id))
                }
                _ => e.into(),
            })
    }
}

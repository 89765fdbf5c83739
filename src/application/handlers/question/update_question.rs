//! UpdateQuestionHandler - rewrite a question and reconcile its options.

use std::sync::Arc;

use crate::domain::checklist::{AnswerKind, ChecklistError};
use crate::domain::foundation::{ErrorCode, QuestionId};
use crate::ports::{QuestionRepository, QuestionUpdate};

pub struct UpdateQuestionHandler {
    repository: Arc<dyn QuestionRepository>,
}

impl UpdateQuestionHandler {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        id: QuestionId,
        update: QuestionUpdate,
    ) -> Result<(), ChecklistError> {
        if update.text.trim().is_empty() {
            return Err(ChecklistError::validation("text", "question text cannot be empty"));
        }
        if update.kind == AnswerKind::SingleSelect && update.options.is_empty() {
            return Err(ChecklistError::validation(
                "options",
                "single-select questions need at least one option",
            ));
        }
        self.repository
            .update(id, &update)
            .await
            .map_err(|e| match e.code {
                ErrorCode::QuestionNotFound => ChecklistError::QuestionNotFound(id),
                _ => ChecklistError::infrastructure(e.to_string()),
            })
    }
}

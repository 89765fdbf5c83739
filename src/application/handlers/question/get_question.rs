//! GetQuestionHandler - fetch one question with its options.

use std::sync::Arc;

use crate::domain::checklist::{ChecklistError, Question};
use crate::domain::foundation::QuestionId;
use crate::ports::QuestionRepository;

pub struct GetQuestionHandler {
    repository: Arc<dyn QuestionRepository>,
}

impl GetQuestionHandler {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, id: QuestionId) -> Result<Question, ChecklistError> {
        self.repository
            .find(id)
            .await
            .map_err(|e| ChecklistError::infrastructure(e.to_string()))?
            .ok_or(ChecklistError::QuestionNotFound(id))
    }
}

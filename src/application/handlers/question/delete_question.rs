//! DeleteQuestionHandler - delete a question and its options.

use std::sync::Arc;

use crate::domain::checklist::ChecklistError;
use crate::domain::foundation::{ErrorCode, QuestionId};
use crate::ports::QuestionRepository;

pub struct DeleteQuestionHandler {
    repository: Arc<dyn QuestionRepository>,
}

impl DeleteQuestionHandler {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, id: QuestionId) -> Result<(), ChecklistError> {
        self.repository.delete(id).await.map_err(|e| match e.code {
            ErrorCode::QuestionNotFound => ChecklistError::QuestionNotFound(id),
            _ => ChecklistError::infrastructure(e.to_string()),
        })
    }
}

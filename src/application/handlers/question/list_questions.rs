//! ListQuestionsHandler - questions by checklist or by step.

use std::sync::Arc;

use crate::domain::checklist::{ChecklistError, Question};
use crate::domain::foundation::{ChecklistId, StepId};
use crate::ports::QuestionRepository;

pub struct ListQuestionsHandler {
    repository: Arc<dyn QuestionRepository>,
}

impl ListQuestionsHandler {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    pub async fn by_checklist(
        &self,
        checklist_id: ChecklistId,
    ) -> Result<Vec<Question>, ChecklistError> {
        self.repository
            .list_by_checklist(checklist_id)
            .await
            .map_err(|e| ChecklistError::infrastructure(e.to_string()))
    }

    pub async fn by_step(&self, step_id: StepId) -> Result<Vec<Question>, ChecklistError> {
        self.repository
            .list_by_step(step_id)
            .await
            .map_err(|e| ChecklistError::infrastructure(e.to_string()))
    }
}

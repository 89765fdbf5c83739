//! CreateChecklistHandler - nested checklist creation.

use std::sync::Arc;

use crate::domain::checklist::{AnswerKind, Checklist, ChecklistError};
use crate::ports::{ChecklistRepository, NewChecklist};

/// Handler for creating a checklist together with its steps and questions.
pub struct CreateChecklistHandler {
    repository: Arc<dyn ChecklistRepository>,
}

impl CreateChecklistHandler {
    pub fn new(repository: Arc<dyn ChecklistRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, new: NewChecklist) -> Result<Checklist, ChecklistError> {
        if new.label.trim().is_empty() {
            return Err(ChecklistError::validation("label", "label cannot be empty"));
        }
        for step in &new.steps {
            if step.name.trim().is_empty() {
                return Err(ChecklistError::validation("steps", "step name cannot be empty"));
            }
            for question in &step.questions {
                if question.text.trim().is_empty() {
                    return Err(ChecklistError::validation(
                        "questions",
                        "question text cannot be empty",
                    ));
                }
                if question.kind == AnswerKind::SingleSelect && question.options.is_empty() {
                    return Err(ChecklistError::validation(
                        "options",
                        "single-select questions need at least one option",
                    ));
                }
            }
        }

        self.repository.create(&new).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ChecklistId, DomainError};
    use crate::ports::{ChecklistUpdate, NewQuestion, NewStep};
    use async_trait::async_trait;

    struct StubRepository;

    #[async_trait]
    impl ChecklistRepository for StubRepository {
        async fn create(&self, new: &NewChecklist) -> Result<Checklist, DomainError> {
            Ok(Checklist {
                id: ChecklistId::new(1),
                label: new.label.clone(),
                version: new.version.clone(),
                description: new.description.clone(),
                steps: vec![],
            })
        }

        async fn update(
            &self,
            _id: ChecklistId,
            _update: &ChecklistUpdate,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        async fn delete(&self, _id: ChecklistId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn creates_checklist_with_trimmable_label() {
        let handler = CreateChecklistHandler::new(Arc::new(StubRepository));
        let result = handler
            .handle(NewChecklist {
                label: "CHECK-LIST « SÉCURITÉ DU PATIENT »".to_string(),
                version: "2018".to_string(),
                description: String::new(),
                steps: vec![],
            })
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rejects_empty_label() {
        let handler = CreateChecklistHandler::new(Arc::new(StubRepository));
        let result = handler
            .handle(NewChecklist {
                label: "   ".to_string(),
                version: String::new(),
                description: String::new(),
                steps: vec![],
            })
            .await;
        assert!(matches!(result, Err(ChecklistError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn rejects_single_select_without_options() {
        let handler = CreateChecklistHandler::new(Arc::new(StubRepository));
        let result = handler
            .handle(NewChecklist {
                label: "CL".to_string(),
                version: String::new(),
                description: String::new(),
                steps: vec![NewStep {
                    name: "Étape".to_string(),
                    questions: vec![NewQuestion {
                        text: "Site".to_string(),
                        kind: AnswerKind::SingleSelect,
                        required: false,
                        options: vec![],
                    }],
                }],
            })
            .await;
        assert!(matches!(result, Err(ChecklistError::ValidationFailed { .. })));
    }
}

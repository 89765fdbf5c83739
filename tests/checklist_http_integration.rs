//! Integration tests for the checklist HTTP layer.
//!
//! These tests verify the HTTP layer wiring:
//! 1. Request DTOs deserialize correctly
//! 2. Response DTOs serialize correctly
//! 3. Handlers can be created and wired together

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use bloc_checklist::adapters::http::checklist::dto::{
    AggregateResponse, ChecklistSummaryResponse, SubmissionResponse,
};
use bloc_checklist::adapters::http::question::dto::SubmitFormRequest;
use bloc_checklist::adapters::http::{ChecklistHandlers, QuestionHandlers};
use bloc_checklist::application::handlers::checklist::{
    AggregateChecklistHandler, CreateChecklistHandler, DeleteChecklistHandler,
    GetChecklistHandler, ListChecklistsHandler, UpdateChecklistHandler,
};
use bloc_checklist::application::handlers::question::{
    CreateQuestionHandler, DeleteQuestionHandler, GetQuestionHandler, ListQuestionsHandler,
    UpdateQuestionHandler,
};
use bloc_checklist::application::handlers::submission::{ListSubmissionsHandler, SubmitFormHandler};
use bloc_checklist::domain::checklist::{AnswerKind, Checklist, Question};
use bloc_checklist::domain::foundation::{
    ChecklistId, DomainError, ErrorCode, QuestionId, StepId, SubmissionId, Timestamp,
};
use bloc_checklist::domain::submission::{CurrentAnswer, FormSubmission, NewSubmission};
use bloc_checklist::ports::{
    ChecklistReader, ChecklistRepository, ChecklistUpdate, FallbackAnswerReader, NewChecklist,
    QuestionRepository, QuestionUpdate, SubmissionReader, SubmissionRepository,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Mock checklist store shared by reader and repository.
struct MockChecklistStore {
    checklists: Mutex<Vec<Checklist>>,
}

impl MockChecklistStore {
    fn new() -> Self {
        Self {
            checklists: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChecklistReader for MockChecklistStore {
    async fn structure(&self, id: ChecklistId) -> Result<Option<Checklist>, DomainError> {
        Ok(self
            .checklists
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Checklist>, DomainError> {
        Ok(self.checklists.lock().unwrap().clone())
    }
}

#[async_trait]
impl ChecklistRepository for MockChecklistStore {
    async fn create(&self, new: &NewChecklist) -> Result<Checklist, DomainError> {
        let checklist = Checklist {
            id: ChecklistId::new(1),
            label: new.label.clone(),
            version: new.version.clone(),
            description: new.description.clone(),
            steps: Vec::new(),
        };
        self.checklists.lock().unwrap().push(checklist.clone());
        Ok(checklist)
    }

    async fn update(&self, id: ChecklistId, update: &ChecklistUpdate) -> Result<(), DomainError> {
        let mut checklists = self.checklists.lock().unwrap();
        match checklists.iter_mut().find(|c| c.id == id) {
            Some(checklist) => {
                checklist.label = update.label.clone();
                checklist.version = update.version.clone();
                checklist.description = update.description.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ChecklistNotFound,
                "not found",
            )),
        }
    }

    async fn delete(&self, id: ChecklistId) -> Result<(), DomainError> {
        let mut checklists = self.checklists.lock().unwrap();
        let before = checklists.len();
        checklists.retain(|c| c.id != id);
        if checklists.len() == before {
            return Err(DomainError::new(ErrorCode::ChecklistNotFound, "not found"));
        }
        Ok(())
    }
}

struct MockQuestionRepository;

#[async_trait]
impl QuestionRepository for MockQuestionRepository {
    async fn create(
        &self,
        _step_id: StepId,
        text: &str,
        kind: AnswerKind,
        required: bool,
        _options: &[String],
    ) -> Result<Question, DomainError> {
        Ok(Question {
            id: QuestionId::new(1),
            text: text.to_string(),
            kind,
            required,
            options: vec![],
            current_answer: None,
        })
    }

    async fn find(&self, _id: QuestionId) -> Result<Option<Question>, DomainError> {
        Ok(None)
    }

    async fn list_by_checklist(
        &self,
        _checklist_id: ChecklistId,
    ) -> Result<Vec<Question>, DomainError> {
        Ok(vec![])
    }

    async fn list_by_step(&self, _step_id: StepId) -> Result<Vec<Question>, DomainError> {
        Ok(vec![])
    }

    async fn update(&self, _id: QuestionId, _update: &QuestionUpdate) -> Result<(), DomainError> {
        Ok(())
    }

    async fn delete(&self, _id: QuestionId) -> Result<(), DomainError> {
        Ok(())
    }
}

struct EmptySubmissions;

#[async_trait]
impl SubmissionReader for EmptySubmissions {
    async fn list_by_checklist(
        &self,
        _checklist_id: ChecklistId,
    ) -> Result<Vec<FormSubmission>, DomainError> {
        Ok(vec![])
    }

    async fn list_by_checklist_legacy(
        &self,
        _checklist_id: ChecklistId,
    ) -> Result<Vec<FormSubmission>, DomainError> {
        Ok(vec![])
    }

    async fn list_nested(
        &self,
        _checklist_id: ChecklistId,
    ) -> Result<Vec<FormSubmission>, DomainError> {
        Ok(vec![])
    }
}

#[async_trait]
impl FallbackAnswerReader for EmptySubmissions {
    async fn current_by_step_join(
        &self,
        _checklist_id: ChecklistId,
    ) -> Result<Vec<CurrentAnswer>, DomainError> {
        Ok(vec![])
    }

    async fn current_by_checklist_column(
        &self,
        _checklist_id: ChecklistId,
    ) -> Result<Vec<CurrentAnswer>, DomainError> {
        Ok(vec![])
    }

    async fn current_nested(
        &self,
        _checklist_id: ChecklistId,
    ) -> Result<Vec<CurrentAnswer>, DomainError> {
        Ok(vec![])
    }
}

struct MockSubmissionRepository;

#[async_trait]
impl SubmissionRepository for MockSubmissionRepository {
    async fn record(&self, new: &NewSubmission) -> Result<FormSubmission, DomainError> {
        Ok(FormSubmission {
            id: SubmissionId::new(1),
            checklist_id: new.checklist_id,
            submitted_by: new.submitted_by.clone(),
            submitted_at: Some(Timestamp::now()),
            answers: new.answers.clone(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_handler_wiring() {
    // Verify all handlers can be created and wired together
    let store = Arc::new(MockChecklistStore::new());
    let questions = Arc::new(MockQuestionRepository);
    let submissions = Arc::new(EmptySubmissions);

    let _checklist_handlers = ChecklistHandlers::new(
        Arc::new(ListChecklistsHandler::new(store.clone())),
        Arc::new(CreateChecklistHandler::new(store.clone())),
        Arc::new(GetChecklistHandler::new(store.clone())),
        Arc::new(UpdateChecklistHandler::new(store.clone())),
        Arc::new(DeleteChecklistHandler::new(store.clone())),
        Arc::new(AggregateChecklistHandler::new(
            store.clone(),
            submissions.clone(),
            submissions.clone(),
        )),
        Arc::new(ListSubmissionsHandler::new(submissions.clone())),
        Arc::new(ListQuestionsHandler::new(questions.clone())),
    );

    let _question_handlers = QuestionHandlers::new(
        Arc::new(GetQuestionHandler::new(questions.clone())),
        Arc::new(CreateQuestionHandler::new(questions.clone())),
        Arc::new(UpdateQuestionHandler::new(questions.clone())),
        Arc::new(DeleteQuestionHandler::new(questions.clone())),
        Arc::new(ListQuestionsHandler::new(questions)),
        Arc::new(SubmitFormHandler::new(store, Arc::new(MockSubmissionRepository))),
    );

    // If we get here, the wiring is correct
}

#[test]
fn test_new_checklist_request_deserializes() {
    let json = json!({
        "label": "CHECK-LIST TEST",
        "version": "2018",
        "steps": [
            {
                "name": "Avant induction",
                "questions": [
                    { "text": "Identité confirmée", "kind": "boolean", "required": true },
                    { "text": "Côté opéré", "kind": "single_select",
                      "options": ["Gauche", "Droite"] }
                ]
            }
        ]
    });

    let req: NewChecklist = serde_json::from_value(json).unwrap();
    assert_eq!(req.label, "CHECK-LIST TEST");
    assert_eq!(req.steps.len(), 1);
    assert_eq!(req.steps[0].questions[0].kind, AnswerKind::Boolean);
    assert!(!req.steps[0].questions[1].required);
    assert_eq!(req.steps[0].questions[1].options.len(), 2);
    assert!(req.description.is_empty());
}

#[test]
fn test_submit_form_request_converts_to_domain() {
    let json = json!({
        "checklist_id": 1,
        "submitted_by": "DUPONT Jean",
        "answers": [
            { "question_id": 100, "value": "Oui" },
            { "question_id": 101, "value": "N/A" }
        ]
    });

    let req: SubmitFormRequest = serde_json::from_value(json).unwrap();
    let submission: NewSubmission = req.into();
    assert_eq!(submission.checklist_id, ChecklistId::new(1));
    assert_eq!(submission.submitted_by.as_deref(), Some("DUPONT Jean"));
    assert_eq!(submission.answers.len(), 2);
    assert_eq!(submission.answers[0].question_id, QuestionId::new(100));
}

#[test]
fn test_question_update_request_deserializes() {
    let json = json!({
        "text": "Côté opéré",
        "kind": "single_select",
        "required": true,
        "options": [
            { "id": 3, "value": "Gauche" },
            { "value": "Droite" }
        ]
    });

    let update: QuestionUpdate = serde_json::from_value(json).unwrap();
    assert_eq!(update.kind, AnswerKind::SingleSelect);
    assert!(update.options[0].id.is_some());
    assert!(update.options[1].id.is_none());
    assert!(update.current_answer.is_none());
}

#[test]
fn test_checklist_summary_response_serializes() {
    let response = ChecklistSummaryResponse {
        id: 1,
        label: "CHECK-LIST TEST".to_string(),
        version: "2018".to_string(),
        description: String::new(),
        step_count: 3,
        question_count: 13,
    };

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["id"], 1);
    assert_eq!(value["question_count"], 13);
}

#[test]
fn test_submission_response_omits_absent_fields() {
    let response = SubmissionResponse {
        id: 1,
        checklist_id: 1,
        submitted_by: None,
        submitted_at: None,
        answers: vec![],
    };

    let value = serde_json::to_value(&response).unwrap();
    assert!(value.get("submitted_by").is_none());
    assert!(value.get("submitted_at").is_none());
}

#[tokio::test]
async fn test_aggregate_response_shape() {
    let store = Arc::new(MockChecklistStore::new());
    store
        .create(&NewChecklist {
            label: "CHECK-LIST TEST".to_string(),
            version: "2018".to_string(),
            description: String::new(),
            steps: vec![],
        })
        .await
        .unwrap();

    let sources = Arc::new(EmptySubmissions);
    let handler = AggregateChecklistHandler::new(store, sources.clone(), sources);
    let view = handler.handle(ChecklistId::new(1)).await.unwrap();
    let response: AggregateResponse = view.into();

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["label"], "CHECK-LIST TEST");
    assert_eq!(value["has_real_submissions"], false);
    assert_eq!(value["total_count"], 0);
    assert_eq!(value["count_label"], "response(s)");
    assert!(value["rows"].as_array().unwrap().is_empty());
}

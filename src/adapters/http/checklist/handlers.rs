//! HTTP handlers for checklist endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::adapters::http::error::checklist_error_response;
use crate::application::handlers::checklist::{
    AggregateChecklistHandler, CreateChecklistHandler, DeleteChecklistHandler,
    GetChecklistHandler, ListChecklistsHandler, UpdateChecklistHandler,
};
use crate::application::handlers::question::ListQuestionsHandler;
use crate::application::handlers::submission::ListSubmissionsHandler;
use crate::domain::foundation::ChecklistId;
use crate::ports::{ChecklistUpdate, NewChecklist};

use super::dto::{
    AggregateResponse, ChecklistResponse, ChecklistSummaryResponse, QuestionResponse,
    SubmissionResponse,
};

#[derive(Clone)]
pub struct ChecklistHandlers {
    list_handler: Arc<ListChecklistsHandler>,
    create_handler: Arc<CreateChecklistHandler>,
    get_handler: Arc<GetChecklistHandler>,
    update_handler: Arc<UpdateChecklistHandler>,
    delete_handler: Arc<DeleteChecklistHandler>,
    aggregate_handler: Arc<AggregateChecklistHandler>,
    submissions_handler: Arc<ListSubmissionsHandler>,
    questions_handler: Arc<ListQuestionsHandler>,
}

impl ChecklistHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        list_handler: Arc<ListChecklistsHandler>,
        create_handler: Arc<CreateChecklistHandler>,
        get_handler: Arc<GetChecklistHandler>,
        update_handler: Arc<UpdateChecklistHandler>,
        delete_handler: Arc<DeleteChecklistHandler>,
        aggregate_handler: Arc<AggregateChecklistHandler>,
        submissions_handler: Arc<ListSubmissionsHandler>,
        questions_handler: Arc<ListQuestionsHandler>,
    ) -> Self {
        Self {
            list_handler,
            create_handler,
            get_handler,
            update_handler,
            delete_handler,
            aggregate_handler,
            submissions_handler,
            questions_handler,
        }
    }
}

/// GET /api/checklists - List all checklists
pub async fn list_checklists(State(handlers): State<ChecklistHandlers>) -> Response {
    match handlers.list_handler.handle().await {
        Ok(checklists) => {
            let response: Vec<ChecklistSummaryResponse> =
                checklists.iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => checklist_error_response(e),
    }
}

/// POST /api/checklists - Create a checklist with its full structure
pub async fn create_checklist(
    State(handlers): State<ChecklistHandlers>,
    Json(req): Json<NewChecklist>,
) -> Response {
    match handlers.create_handler.handle(req).await {
        Ok(created) => {
            let response: ChecklistResponse = created.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => checklist_error_response(e),
    }
}

/// GET /api/checklists/:id - Fetch one checklist structure
pub async fn get_checklist(
    State(handlers): State<ChecklistHandlers>,
    Path(id): Path<i64>,
) -> Response {
    match handlers.get_handler.handle(ChecklistId::new(id)).await {
        Ok(checklist) => {
            let response: ChecklistResponse = checklist.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => checklist_error_response(e),
    }
}

/// PUT /api/checklists/:id - Update scalar checklist fields
pub async fn update_checklist(
    State(handlers): State<ChecklistHandlers>,
    Path(id): Path<i64>,
    Json(req): Json<ChecklistUpdate>,
) -> Response {
    match handlers.update_handler.handle(ChecklistId::new(id), req).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => checklist_error_response(e),
    }
}

/// DELETE /api/checklists/:id - Delete a checklist and everything under it
pub async fn delete_checklist(
    State(handlers): State<ChecklistHandlers>,
    Path(id): Path<i64>,
) -> Response {
    match handlers.delete_handler.handle(ChecklistId::new(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => checklist_error_response(e),
    }
}

/// GET /api/checklists/:id/aggregate - Structure merged with all answers
pub async fn aggregate_checklist(
    State(handlers): State<ChecklistHandlers>,
    Path(id): Path<i64>,
) -> Response {
    match handlers.aggregate_handler.handle(ChecklistId::new(id)).await {
        Ok(view) => {
            let response: AggregateResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => checklist_error_response(e),
    }
}

/// GET /api/checklists/:id/submissions - Raw submissions of a checklist
pub async fn list_submissions(
    State(handlers): State<ChecklistHandlers>,
    Path(id): Path<i64>,
) -> Response {
    match handlers.submissions_handler.handle(ChecklistId::new(id)).await {
        Ok(submissions) => {
            let response: Vec<SubmissionResponse> =
                submissions.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => checklist_error_response(e),
    }
}

/// GET /api/checklists/:id/questions - All questions of a checklist
pub async fn list_checklist_questions(
    State(handlers): State<ChecklistHandlers>,
    Path(id): Path<i64>,
) -> Response {
    match handlers.questions_handler.by_checklist(ChecklistId::new(id)).await {
        Ok(questions) => {
            let response: Vec<QuestionResponse> =
                questions.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => checklist_error_response(e),
    }
}

//! HTTP handlers for question endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::adapters::http::checklist::dto::{QuestionResponse, SubmissionResponse};
use crate::adapters::http::error::checklist_error_response;
use crate::application::handlers::question::{
    CreateQuestionHandler, DeleteQuestionHandler, GetQuestionHandler, ListQuestionsHandler,
    UpdateQuestionHandler,
};
use crate::application::handlers::submission::SubmitFormHandler;
use crate::domain::foundation::{ChecklistId, QuestionId, StepId};
use crate::ports::QuestionUpdate;

use super::dto::{CreateQuestionRequest, SubmitFormRequest};

#[derive(Clone)]
pub struct QuestionHandlers {
    get_handler: Arc<GetQuestionHandler>,
    create_handler: Arc<CreateQuestionHandler>,
    update_handler: Arc<UpdateQuestionHandler>,
    delete_handler: Arc<DeleteQuestionHandler>,
    list_handler: Arc<ListQuestionsHandler>,
    submit_handler: Arc<SubmitFormHandler>,
}

impl QuestionHandlers {
    pub fn new(
        get_handler: Arc<GetQuestionHandler>,
        create_handler: Arc<CreateQuestionHandler>,
        update_handler: Arc<UpdateQuestionHandler>,
        delete_handler: Arc<DeleteQuestionHandler>,
        list_handler: Arc<ListQuestionsHandler>,
        submit_handler: Arc<SubmitFormHandler>,
    ) -> Self {
        Self {
            get_handler,
            create_handler,
            update_handler,
            delete_handler,
            list_handler,
            submit_handler,
        }
    }
}

/// GET /api/questions/:id - Fetch one question
pub async fn get_question(
    State(handlers): State<QuestionHandlers>,
    Path(id): Path<i64>,
) -> Response {
    match handlers.get_handler.handle(QuestionId::new(id)).await {
        Ok(question) => {
            let response: QuestionResponse = question.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => checklist_error_response(e),
    }
}

/// POST /api/questions - Create a question under a step
pub async fn create_question(
    State(handlers): State<QuestionHandlers>,
    Json(req): Json<CreateQuestionRequest>,
) -> Response {
    let result = handlers
        .create_handler
        .handle(
            StepId::new(req.step_id),
            req.text,
            req.kind,
            req.required,
            req.options,
        )
        .await;
    match result {
        Ok(created) => {
            let response: QuestionResponse = created.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => checklist_error_response(e),
    }
}

/// PUT /api/questions/:id - Update a question and reconcile its options
pub async fn update_question(
    State(handlers): State<QuestionHandlers>,
    Path(id): Path<i64>,
    Json(req): Json<QuestionUpdate>,
) -> Response {
    match handlers.update_handler.handle(QuestionId::new(id), req).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => checklist_error_response(e),
    }
}

/// DELETE /api/questions/:id - Delete a question
pub async fn delete_question(
    State(handlers): State<QuestionHandlers>,
    Path(id): Path<i64>,
) -> Response {
    match handlers.delete_handler.handle(QuestionId::new(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => checklist_error_response(e),
    }
}

/// GET /api/questions/by-checklist/:id - Questions across a whole checklist
pub async fn list_by_checklist(
    State(handlers): State<QuestionHandlers>,
    Path(id): Path<i64>,
) -> Response {
    match handlers.list_handler.by_checklist(ChecklistId::new(id)).await {
        Ok(questions) => {
            let response: Vec<QuestionResponse> =
                questions.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => checklist_error_response(e),
    }
}

/// GET /api/questions/by-step/:id - Questions of one step
pub async fn list_by_step(
    State(handlers): State<QuestionHandlers>,
    Path(id): Path<i64>,
) -> Response {
    match handlers.list_handler.by_step(StepId::new(id)).await {
        Ok(questions) => {
            let response: Vec<QuestionResponse> =
                questions.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => checklist_error_response(e),
    }
}

/// POST /api/questions/submit-form - Record a filled form
pub async fn submit_form(
    State(handlers): State<QuestionHandlers>,
    Json(req): Json<SubmitFormRequest>,
) -> Response {
    match handlers.submit_handler.handle(req.into()).await {
        Ok(recorded) => {
            let response: SubmissionResponse = recorded.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => checklist_error_response(e),
    }
}

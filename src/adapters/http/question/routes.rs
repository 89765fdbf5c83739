//! HTTP routes for question endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{
    create_question, delete_question, get_question, list_by_checklist, list_by_step,
    submit_form, update_question, QuestionHandlers,
};

/// Creates the question router with all endpoints.
pub fn question_routes(handlers: QuestionHandlers) -> Router {
    Router::new()
        .route("/", post(create_question))
        .route("/:id", get(get_question))
        .route("/:id", put(update_question))
        .route("/:id", delete(delete_question))
        .route("/by-checklist/:id", get(list_by_checklist))
        .route("/by-step/:id", get(list_by_step))
        .route("/submit-form", post(submit_form))
        .with_state(handlers)
}

//! HTTP routes for checklist endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{
    aggregate_checklist, create_checklist, delete_checklist, get_checklist,
    list_checklist_questions, list_checklists, list_submissions, update_checklist,
    ChecklistHandlers,
};

/// Creates the checklist router with all endpoints.
pub fn checklist_routes(handlers: ChecklistHandlers) -> Router {
    Router::new()
        .route("/", get(list_checklists))
        .route("/", post(create_checklist))
        .route("/:id", get(get_checklist))
        .route("/:id", put(update_checklist))
        .route("/:id", delete(delete_checklist))
        .route("/:id/aggregate", get(aggregate_checklist))
        .route("/:id/submissions", get(list_submissions))
        .route("/:id/questions", get(list_checklist_questions))
        .with_state(handlers)
}

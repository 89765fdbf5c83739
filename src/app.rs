//! Application wiring: adapters, use-case handlers and the axum router.

use std::sync::Arc;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::adapters::http::{checklist_routes, question_routes, ChecklistHandlers, QuestionHandlers};
use crate::adapters::postgres::{
    PostgresChecklistReader, PostgresChecklistRepository, PostgresFallbackAnswerReader,
    PostgresQuestionRepository, PostgresSubmissionReader, PostgresSubmissionRepository,
};
use crate::application::handlers::checklist::{
    AggregateChecklistHandler, CreateChecklistHandler, DeleteChecklistHandler,
    GetChecklistHandler, ListChecklistsHandler, UpdateChecklistHandler,
};
use crate::application::handlers::question::{
    CreateQuestionHandler, DeleteQuestionHandler, GetQuestionHandler, ListQuestionsHandler,
    UpdateQuestionHandler,
};
use crate::application::handlers::submission::{ListSubmissionsHandler, SubmitFormHandler};
use crate::config::AppConfig;
use crate::ports::{
    ChecklistReader, ChecklistRepository, FallbackAnswerReader, QuestionRepository,
    SubmissionReader, SubmissionRepository,
};

/// Builds the full application router against a database pool.
pub fn build_router(pool: PgPool, config: &AppConfig) -> Router {
    let checklist_reader: Arc<dyn ChecklistReader> =
        Arc::new(PostgresChecklistReader::new(pool.clone()));
    let checklist_repository: Arc<dyn ChecklistRepository> =
        Arc::new(PostgresChecklistRepository::new(pool.clone()));
    let question_repository: Arc<dyn QuestionRepository> =
        Arc::new(PostgresQuestionRepository::new(pool.clone()));
    let submission_reader: Arc<dyn SubmissionReader> =
        Arc::new(PostgresSubmissionReader::new(pool.clone()));
    let fallback_reader: Arc<dyn FallbackAnswerReader> =
        Arc::new(PostgresFallbackAnswerReader::new(pool.clone()));
    let submission_repository: Arc<dyn SubmissionRepository> =
        Arc::new(PostgresSubmissionRepository::new(pool));

    let checklist_handlers = ChecklistHandlers::new(
        Arc::new(ListChecklistsHandler::new(checklist_reader.clone())),
        Arc::new(CreateChecklistHandler::new(checklist_repository.clone())),
        Arc::new(GetChecklistHandler::new(checklist_reader.clone())),
        Arc::new(UpdateChecklistHandler::new(checklist_repository.clone())),
        Arc::new(DeleteChecklistHandler::new(checklist_repository)),
        Arc::new(AggregateChecklistHandler::new(
            checklist_reader.clone(),
            submission_reader.clone(),
            fallback_reader,
        )),
        Arc::new(ListSubmissionsHandler::new(submission_reader)),
        Arc::new(ListQuestionsHandler::new(question_repository.clone())),
    );

    let question_handlers = QuestionHandlers::new(
        Arc::new(GetQuestionHandler::new(question_repository.clone())),
        Arc::new(CreateQuestionHandler::new(question_repository.clone())),
        Arc::new(UpdateQuestionHandler::new(question_repository.clone())),
        Arc::new(DeleteQuestionHandler::new(question_repository.clone())),
        Arc::new(ListQuestionsHandler::new(question_repository)),
        Arc::new(SubmitFormHandler::new(checklist_reader, submission_repository)),
    );

    Router::new()
        .route("/health", get(health))
        .nest("/api/checklists", checklist_routes(checklist_handlers))
        .nest("/api/questions", question_routes(question_handlers))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(config.server.request_timeout()))
                .layer(CompressionLayer::new())
                .layer(cors_layer(config))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

/// GET /health - Liveness probe
async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let mut origins: Vec<HeaderValue> = Vec::new();
    for origin in config.server.cors_origins_list() {
        match origin.parse::<HeaderValue>() {
            Ok(value) => origins.push(value),
            Err(_) => warn!(origin, "ignoring malformed CORS origin"),
        }
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
}

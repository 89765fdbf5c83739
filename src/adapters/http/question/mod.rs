//! HTTP adapter for question endpoints, including form submission.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::QuestionHandlers;
pub use routes::question_routes;

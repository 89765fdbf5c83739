//! HTTP adapter for checklist endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ChecklistHandlers;
pub use routes::checklist_routes;

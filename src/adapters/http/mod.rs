//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod checklist;
pub mod error;
pub mod question;

pub use checklist::{checklist_routes, ChecklistHandlers};
pub use question::{question_routes, QuestionHandlers};

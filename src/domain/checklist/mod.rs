//! Checklist domain - structure and aggregated submission view.
//!
//! A checklist owns ordered steps, each step owns typed questions, and a
//! single-select question owns its response options. The `aggregated` module
//! holds the read-only projection that merges this structure with submitted
//! (or fallback) answers.

mod aggregated;
mod checklist;
mod errors;

pub use aggregated::{
    AggregatedChecklist, AggregatedQuestion, AggregatedStep, AnswerRow, AnswerTally,
    QuestionSubmission,
};
pub use checklist::{AnswerKind, AnswerOption, Checklist, Question, Step};
pub use errors::ChecklistError;

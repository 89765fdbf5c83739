//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! domain and the outside world. Adapters implement these ports.
//!
//! ## Read side
//!
//! - `ChecklistReader` - checklist structure queries
//! - `SubmissionReader` - structured submission queries (three query shapes)
//! - `FallbackAnswerReader` - current-answer queries (three query shapes)
//!
//! ## Write side
//!
//! - `ChecklistRepository` - checklist lifecycle with nested creation
//! - `QuestionRepository` - question CRUD with option reconciliation
//! - `SubmissionRepository` - append-only submission recording

mod checklist_reader;
mod checklist_repository;
mod question_repository;
mod submission_reader;
mod submission_repository;

pub use checklist_reader::ChecklistReader;
pub use checklist_repository::{
    ChecklistRepository, ChecklistUpdate, NewChecklist, NewQuestion, NewStep,
};
pub use question_repository::{OptionUpsert, QuestionRepository, QuestionUpdate};
pub use submission_reader::{FallbackAnswerReader, SubmissionReader};
pub use submission_repository::SubmissionRepository;

//! PostgreSQL adapters - database implementations of the repository and
//! reader ports.

mod checklist_reader;
mod checklist_repository;
mod question_repository;
mod seed;
mod submission_reader;
mod submission_repository;

pub use checklist_reader::PostgresChecklistReader;
pub use checklist_repository::PostgresChecklistRepository;
pub use question_repository::PostgresQuestionRepository;
pub use seed::seed_demo_checklist;
pub use submission_reader::{PostgresFallbackAnswerReader, PostgresSubmissionReader};
pub use submission_repository::PostgresSubmissionRepository;

use crate::domain::foundation::DomainError;

/// Wraps an sqlx error into the domain error taxonomy.
pub(crate) fn db_err(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::database(format!("{}: {}", context, err))
}

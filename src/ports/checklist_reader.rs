//! Checklist reader port (read side).
//!
//! The structure provider of the aggregation pipeline: returns a checklist
//! with its steps, questions and options fully loaded.

use crate::domain::checklist::Checklist;
use crate::domain::foundation::{ChecklistId, DomainError};
use async_trait::async_trait;

/// Reader port for checklist structure queries.
#[async_trait]
pub trait ChecklistReader: Send + Sync {
    /// Fetch one checklist with steps, questions and options.
    ///
    /// Returns `None` if not found.
    async fn structure(&self, id: ChecklistId) -> Result<Option<Checklist>, DomainError>;

    /// List all checklists with their full structure, ordered by id.
    async fn list(&self) -> Result<Vec<Checklist>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn checklist_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn ChecklistReader) {}
    }
}

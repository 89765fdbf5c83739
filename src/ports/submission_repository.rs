//! Submission repository port (write side).
//!
//! Submissions are immutable facts: record-only, no update or delete. They
//! disappear only through checklist cascade deletion.

use crate::domain::foundation::DomainError;
use crate::domain::submission::{FormSubmission, NewSubmission};
use async_trait::async_trait;

/// Repository port for recording form submissions.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Persist a validated submission and its answers.
    ///
    /// Returns the stored record with its database-assigned identifier and
    /// submission timestamp. Also refreshes each answered question's
    /// current-answer value, which feeds the fallback source.
    async fn record(&self, submission: &NewSubmission) -> Result<FormSubmission, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn submission_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SubmissionRepository) {}
    }
}

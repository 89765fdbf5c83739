//! Submission and fallback-answer reader ports (read side).
//!
//! Both providers are best-effort: the aggregator tries their query shapes
//! in order and takes the first non-empty result, treating any error as an
//! empty result. The multiple shapes exist because the stored schema evolved;
//! older rows are only reachable through the legacy joins.

use crate::domain::foundation::{ChecklistId, DomainError};
use crate::domain::submission::{CurrentAnswer, FormSubmission};
use async_trait::async_trait;

/// Reader port for structured form submissions.
///
/// Query shapes, in the order the aggregator tries them:
/// 1. [`list_by_checklist`](Self::list_by_checklist) - direct checklist key
/// 2. [`list_by_checklist_legacy`](Self::list_by_checklist_legacy) - legacy
///    rows without a checklist key, reached through their answers
/// 3. [`list_nested`](Self::list_nested) - per-step collection
#[async_trait]
pub trait SubmissionReader: Send + Sync {
    /// Submissions keyed directly on the checklist.
    async fn list_by_checklist(
        &self,
        checklist_id: ChecklistId,
    ) -> Result<Vec<FormSubmission>, DomainError>;

    /// Legacy shape: submissions found through their answers' questions.
    async fn list_by_checklist_legacy(
        &self,
        checklist_id: ChecklistId,
    ) -> Result<Vec<FormSubmission>, DomainError>;

    /// Nested shape: submissions collected step by step.
    async fn list_nested(
        &self,
        checklist_id: ChecklistId,
    ) -> Result<Vec<FormSubmission>, DomainError>;
}

/// Reader port for fallback "current answer" values, used only when no
/// structured submission exists anywhere in the checklist.
///
/// Query shapes, in the order the aggregator tries them:
/// 1. [`current_by_step_join`](Self::current_by_step_join) - canonical join
///    through steps
/// 2. [`current_by_checklist_column`](Self::current_by_checklist_column) -
///    legacy direct checklist column on questions
/// 3. [`current_nested`](Self::current_nested) - via the checklist row
#[async_trait]
pub trait FallbackAnswerReader: Send + Sync {
    /// Current answers joined through the step table.
    async fn current_by_step_join(
        &self,
        checklist_id: ChecklistId,
    ) -> Result<Vec<CurrentAnswer>, DomainError>;

    /// Current answers through the legacy checklist column.
    async fn current_by_checklist_column(
        &self,
        checklist_id: ChecklistId,
    ) -> Result<Vec<CurrentAnswer>, DomainError>;

    /// Current answers collected from the checklist side.
    async fn current_nested(
        &self,
        checklist_id: ChecklistId,
    ) -> Result<Vec<CurrentAnswer>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety tests
    #[test]
    fn submission_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn SubmissionReader) {}
    }

    #[test]
    fn fallback_answer_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn FallbackAnswerReader) {}
    }
}

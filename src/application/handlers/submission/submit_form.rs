//! SubmitFormHandler - validate and record a form submission.

use std::sync::Arc;

use tracing::info;

use crate::domain::checklist::ChecklistError;
use crate::domain::submission::{FormSubmission, NewSubmission};
use crate::ports::{ChecklistReader, SubmissionRepository};

/// Handler for recording structured form submissions.
///
/// Validation runs against the live checklist structure, so a submission can
/// only carry answers for questions that exist, with values their kind
/// accepts, and must answer every required question.
pub struct SubmitFormHandler {
    structure: Arc<dyn ChecklistReader>,
    repository: Arc<dyn SubmissionRepository>,
}

impl SubmitFormHandler {
    pub fn new(
        structure: Arc<dyn ChecklistReader>,
        repository: Arc<dyn SubmissionRepository>,
    ) -> Self {
        Self {
            structure,
            repository,
        }
    }

    pub async fn handle(&self, new: NewSubmission) -> Result<FormSubmission, ChecklistError> {
        let checklist = self
            .structure
            .structure(new.checklist_id)
            .await
            .map_err(|e| ChecklistError::infrastructure(e.to_string()))?
            .ok_or(ChecklistError::NotFound(new.checklist_id))?;

        new.validate(&checklist)?;

        let stored = self
            .repository
            .record(&new)
            .await
            .map_err(|e| ChecklistError::infrastructure(e.to_string()))?;

        info!(
            checklist_id = %stored.checklist_id,
            submission_id = %stored.id,
            answers = stored.answers.len(),
            "form submission recorded"
        );
        Ok(stored)
    }
}

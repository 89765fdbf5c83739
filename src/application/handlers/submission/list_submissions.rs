//! ListSubmissionsHandler - submissions recorded for one checklist.

use std::sync::Arc;

use crate::domain::checklist::ChecklistError;
use crate::domain::foundation::ChecklistId;
use crate::domain::submission::FormSubmission;
use crate::ports::SubmissionReader;

/// Lists submissions through the canonical query shape. Unlike the
/// aggregator this is a plain listing endpoint, so errors propagate.
pub struct ListSubmissionsHandler {
    reader: Arc<dyn SubmissionReader>,
}

impl ListSubmissionsHandler {
    pub fn new(reader: Arc<dyn SubmissionReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        checklist_id: ChecklistId,
    ) -> Result<Vec<FormSubmission>, ChecklistError> {
        self.reader
            .list_by_checklist(checklist_id)
            .await
            .map_err(|e| ChecklistError::infrastructure(e.to_string()))
    }
}

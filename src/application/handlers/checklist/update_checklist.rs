//! UpdateChecklistHandler - update a checklist's scalar fields.

use std::sync::Arc;

use crate::domain::checklist::ChecklistError;
use crate::domain::foundation::{ChecklistId, ErrorCode};
use crate::ports::{ChecklistRepository, ChecklistUpdate};

pub struct UpdateChecklistHandler {
    repository: Arc<dyn ChecklistRepository>,
}

impl UpdateChecklistHandler {
    pub fn new(repository: Arc<dyn ChecklistRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        id: ChecklistId,
        update: ChecklistUpdate,
    ) -> Result<(), ChecklistError> {
        if update.label.trim().is_empty() {
            return Err(ChecklistError::validation("label", "label cannot be empty"));
        }
        self.repository
            .update(id, &update)
            .await
            .map_err(|e| match e.code {
                ErrorCode::ChecklistNotFound => ChecklistError::NotFound(id),
                _ => ChecklistError::infrastructure(e.to_string()),
            })
    }
}

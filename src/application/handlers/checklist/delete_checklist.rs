//! DeleteChecklistHandler - cascading checklist deletion.

use std::sync::Arc;

use crate::domain::checklist::ChecklistError;
use crate::domain::foundation::{ChecklistId, ErrorCode};
use crate::ports::ChecklistRepository;

pub struct DeleteChecklistHandler {
    repository: Arc<dyn ChecklistRepository>,
}

impl DeleteChecklistHandler {
    pub fn new(repository: Arc<dyn ChecklistRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, id: ChecklistId) -> Result<(), ChecklistError> {
        self.repository.delete(id).await.map_err(|e| match e.code {
            ErrorCode::ChecklistNotFound => ChecklistError::NotFound(id),
            _ => ChecklistError::infrastructure(e.to_string()),
        })
    }
}

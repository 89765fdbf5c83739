//! GetChecklistHandler - fetch one checklist with its structure.

use std::sync::Arc;

use crate::domain::checklist::{Checklist, ChecklistError};
use crate::domain::foundation::ChecklistId;
use crate::ports::ChecklistReader;

pub struct GetChecklistHandler {
    reader: Arc<dyn ChecklistReader>,
}

impl GetChecklistHandler {
    pub fn new(reader: Arc<dyn ChecklistReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, id: ChecklistId) -> Result<Checklist, ChecklistError> {
        self.reader
            .structure(id)
            .await
            .map_err(|e| ChecklistError::infrastructure(e.to_string()))?
            .ok_or(ChecklistError::NotFound(id))
    }
}

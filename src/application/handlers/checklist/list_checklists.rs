//! ListChecklistsHandler - list every checklist with its structure.

use std::sync::Arc;

use crate::domain::checklist::{Checklist, ChecklistError};
use crate::ports::ChecklistReader;

pub struct ListChecklistsHandler {
    reader: Arc<dyn ChecklistReader>,
}

impl ListChecklistsHandler {
    pub fn new(reader: Arc<dyn ChecklistReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self) -> Result<Vec<Checklist>, ChecklistError> {
        self.reader
            .list()
            .await
            .map_err(|e| ChecklistError::infrastructure(e.to_string()))
    }
}

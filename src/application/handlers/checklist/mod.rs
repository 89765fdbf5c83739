//! Checklist use cases.

mod aggregate_checklist;
mod create_checklist;
mod delete_checklist;
mod get_checklist;
mod list_checklists;
mod update_checklist;

pub use aggregate_checklist::AggregateChecklistHandler;
pub use create_checklist::CreateChecklistHandler;
pub use delete_checklist::DeleteChecklistHandler;
pub use get_checklist::GetChecklistHandler;
pub use list_checklists::ListChecklistsHandler;
pub use update_checklist::UpdateChecklistHandler;

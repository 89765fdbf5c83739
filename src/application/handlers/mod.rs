//! Use case handlers, grouped by aggregate.

pub mod checklist;
pub mod question;
pub mod submission;

//! Submission use cases.

mod list_submissions;
mod submit_form;

pub use list_submissions::ListSubmissionsHandler;
pub use submit_form::SubmitFormHandler;

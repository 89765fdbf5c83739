//! Submission domain - structured form responses.

mod submission;

pub use submission::{CurrentAnswer, FormSubmission, NewSubmission, SubmissionAnswer};

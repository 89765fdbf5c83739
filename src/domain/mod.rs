//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `checklist` - Checklist structure (steps, questions, options) and the
//!   aggregated submission view
//! - `submission` - Structured form submissions and their write-side validation

pub mod checklist;
pub mod foundation;
pub mod submission;

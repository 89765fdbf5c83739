//! Strongly-typed identifier value objects.
//!
//! Identifiers are database-assigned positive integers. Newtypes keep a
//! `StepId` from being passed where a `QuestionId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! int_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database identifier.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw integer value.
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

int_id! {
    /// Unique identifier for a checklist.
    ChecklistId
}

int_id! {
    /// Unique identifier for a step within a checklist.
    StepId
}

int_id! {
    /// Unique identifier for a question within a step.
    QuestionId
}

int_id! {
    /// Unique identifier for a response option of a single-select question.
    OptionId
}

int_id! {
    /// Unique identifier for a structured form submission.
    ///
    /// Pseudo-submissions (fallback answer values) carry no `SubmissionId`.
    SubmissionId
}

//! Checklist structure: checklist, steps, questions and response options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{ChecklistId, OptionId, QuestionId, StepId};

/// The expected answer shape of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    /// Yes/no question; accepted values are "Oui" and "Non".
    Boolean,
    /// Yes/no question with a not-applicable escape; accepts "Oui", "Non", "N/A".
    BooleanNa,
    /// Free-form text.
    FreeText,
    /// One value out of the question's option set.
    SingleSelect,
}

impl AnswerKind {
    /// Canonical string form, also used as the database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerKind::Boolean => "boolean",
            AnswerKind::BooleanNa => "boolean_na",
            AnswerKind::FreeText => "free_text",
            AnswerKind::SingleSelect => "single_select",
        }
    }

    /// The fixed choice set for boolean kinds, if any.
    pub fn fixed_choices(&self) -> Option<&'static [&'static str]> {
        match self {
            AnswerKind::Boolean => Some(&["Oui", "Non"]),
            AnswerKind::BooleanNa => Some(&["Oui", "Non", "N/A"]),
            AnswerKind::FreeText | AnswerKind::SingleSelect => None,
        }
    }
}

impl fmt::Display for AnswerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnswerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boolean" => Ok(AnswerKind::Boolean),
            "boolean_na" => Ok(AnswerKind::BooleanNa),
            "free_text" => Ok(AnswerKind::FreeText),
            "single_select" => Ok(AnswerKind::SingleSelect),
            other => Err(format!("unknown answer kind: {}", other)),
        }
    }
}

/// One allowed value for a single-select question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: OptionId,
    pub value: String,
}

/// A single prompt with a typed expected answer shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub kind: AnswerKind,
    pub required: bool,
    /// Valid values; only meaningful for `SingleSelect`.
    pub options: Vec<AnswerOption>,
    /// Last recorded "current" value, used as the fallback answer source
    /// when no structured submission exists.
    pub current_answer: Option<String>,
}

impl Question {
    /// Whether `value` is an acceptable answer for this question.
    ///
    /// Boolean kinds are limited to their fixed choice set, single-select to
    /// the option values, and free text to any non-blank string. Comparison
    /// is on the trimmed value.
    pub fn accepts(&self, value: &str) -> bool {
        let v = value.trim();
        if v.is_empty() {
            return false;
        }
        match self.kind {
            AnswerKind::Boolean | AnswerKind::BooleanNa => self
                .kind
                .fixed_choices()
                .is_some_and(|choices| choices.contains(&v)),
            AnswerKind::SingleSelect => self.options.iter().any(|o| o.value == v),
            AnswerKind::FreeText => true,
        }
    }
}

/// Named, ordered group of questions within a checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub name: String,
    /// Ordinal position within the checklist, starting at 0.
    pub position: i32,
    pub validated: bool,
    pub questions: Vec<Question>,
}

/// Top-level named procedure template containing ordered steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checklist {
    pub id: ChecklistId,
    pub label: String,
    pub version: String,
    pub description: String,
    pub steps: Vec<Step>,
}

impl Checklist {
    /// Total number of questions across all steps.
    pub fn question_count(&self) -> usize {
        self.steps.iter().map(|s| s.questions.len()).sum()
    }

    /// Looks up a question anywhere in the checklist.
    pub fn find_question(&self, id: QuestionId) -> Option<&Question> {
        self.steps
            .iter()
            .flat_map(|s| s.questions.iter())
            .find(|q| q.id == id)
    }
}

//! Aggregated submission view - checklist structure merged with answers.
//!
//! The aggregated view is a read-only projection built fresh on every read.
//! Each question carries its resolved list of [`QuestionSubmission`]s, which
//! are either all real (identified submissions) or pseudo-submissions taken
//! from the fallback "current answer" source. The choice of source is made
//! per checklist, never per question.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::domain::foundation::{ChecklistId, QuestionId, StepId, SubmissionId, Timestamp};

use super::checklist::{AnswerKind, AnswerOption, Checklist};

/// One answer value attached to a question in the aggregated view.
///
/// `submission_id` is `None` for pseudo-submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSubmission {
    pub submission_id: Option<SubmissionId>,
    pub value: String,
    pub submitted_by: Option<String>,
    pub submitted_at: Option<Timestamp>,
}

impl QuestionSubmission {
    /// An answer carried by an identified form submission.
    pub fn real(
        submission_id: SubmissionId,
        value: impl Into<String>,
        submitted_by: Option<String>,
        submitted_at: Option<Timestamp>,
    ) -> Self {
        Self {
            submission_id: Some(submission_id),
            value: value.into(),
            submitted_by,
            submitted_at,
        }
    }

    /// A pseudo-submission built from a fallback answer value.
    pub fn fallback(value: impl Into<String>) -> Self {
        Self {
            submission_id: None,
            value: value.into(),
            submitted_by: None,
            submitted_at: None,
        }
    }

    /// Whether this answer came from an identified submission.
    pub fn is_real(&self) -> bool {
        self.submission_id.is_some()
    }
}

/// Per-question counts of "Oui", "Non" and "N/A" answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerTally {
    pub oui: usize,
    pub non: usize,
    pub na: usize,
}

/// A question plus its resolved answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedQuestion {
    pub id: QuestionId,
    pub text: String,
    pub kind: AnswerKind,
    pub required: bool,
    pub options: Vec<AnswerOption>,
    pub submissions: Vec<QuestionSubmission>,
}

impl AggregatedQuestion {
    /// Counts trimmed answer values: "Oui" and "Non" case-sensitively,
    /// "N/A" / "NA" case-insensitively.
    pub fn tally(&self) -> AnswerTally {
        let mut tally = AnswerTally::default();
        for sub in &self.submissions {
            let v = sub.value.trim();
            if v == "Oui" {
                tally.oui += 1;
            } else if v == "Non" {
                tally.non += 1;
            } else {
                let upper = v.to_uppercase();
                if upper == "N/A" || upper == "NA" {
                    tally.na += 1;
                }
            }
        }
        tally
    }

    /// The most recent answer for this question.
    ///
    /// If any answer carries a timestamp, the one with the maximum timestamp
    /// wins; among equal timestamps the last in insertion order is returned
    /// (`max_by_key` keeps the last maximum). Without timestamps the last
    /// answer in insertion order wins. `None` when there are no answers.
    pub fn latest_answer(&self) -> Option<&QuestionSubmission> {
        let best_timestamped = self
            .submissions
            .iter()
            .filter(|s| s.submitted_at.is_some())
            .max_by_key(|s| s.submitted_at);
        best_timestamped.or_else(|| self.submissions.last())
    }
}

/// A step plus its aggregated questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedStep {
    pub id: StepId,
    pub name: String,
    pub position: i32,
    pub validated: bool,
    pub questions: Vec<AggregatedQuestion>,
}

/// One flattened (step, question, answer) row for tabular display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRow {
    pub step_name: String,
    pub question_text: String,
    pub value: String,
    pub submitted_by: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub submission_id: Option<SubmissionId>,
}

impl AnswerRow {
    fn sort_key(&self) -> String {
        format!("{}{}", self.step_name, self.question_text).to_lowercase()
    }
}

/// The merged, read-only tree combining checklist structure with answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedChecklist {
    pub id: ChecklistId,
    pub label: String,
    pub version: String,
    pub description: String,
    pub steps: Vec<AggregatedStep>,
}

impl AggregatedChecklist {
    /// Builds the skeleton view from a checklist structure, with every
    /// question's answer slot initially empty.
    pub fn from_structure(checklist: Checklist) -> Self {
        Self {
            id: checklist.id,
            label: checklist.label,
            version: checklist.version,
            description: checklist.description,
            steps: checklist
                .steps
                .into_iter()
                .map(|step| AggregatedStep {
                    id: step.id,
                    name: step.name,
                    position: step.position,
                    validated: step.validated,
                    questions: step
                        .questions
                        .into_iter()
                        .map(|q| AggregatedQuestion {
                            id: q.id,
                            text: q.text,
                            kind: q.kind,
                            required: q.required,
                            options: q.options,
                            submissions: Vec::new(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Index from question id to (step index, question index).
    pub fn question_index(&self) -> HashMap<QuestionId, (usize, usize)> {
        let mut index = HashMap::new();
        for (si, step) in self.steps.iter().enumerate() {
            for (qi, question) in step.questions.iter().enumerate() {
                index.insert(question.id, (si, qi));
            }
        }
        index
    }

    /// Appends an answer into the slot located by `question_index`.
    pub fn push_answer(&mut self, slot: (usize, usize), answer: QuestionSubmission) {
        self.steps[slot.0].questions[slot.1].submissions.push(answer);
    }

    fn questions(&self) -> impl Iterator<Item = &AggregatedQuestion> {
        self.steps.iter().flat_map(|s| s.questions.iter())
    }

    /// True iff any question anywhere holds an identified answer.
    pub fn has_real_submissions(&self) -> bool {
        self.questions()
            .any(|q| q.submissions.iter().any(QuestionSubmission::is_real))
    }

    /// Header label for the total count.
    pub fn count_label(&self) -> &'static str {
        if self.has_real_submissions() {
            "submission(s)"
        } else {
            "response(s)"
        }
    }

    /// Distinct identified submissions, or, when only pseudo-submissions
    /// exist, the number of questions holding at least one answer.
    pub fn total_count(&self) -> usize {
        let mut ids: HashSet<SubmissionId> = HashSet::new();
        let mut pseudo_questions = 0;
        for question in self.questions() {
            if question.submissions.is_empty() {
                continue;
            }
            for sub in &question.submissions {
                if let Some(id) = sub.submission_id {
                    ids.insert(id);
                }
            }
            if question.submissions.iter().all(|s| !s.is_real()) {
                pseudo_questions += 1;
            }
        }
        if ids.is_empty() {
            pseudo_questions
        } else {
            ids.len()
        }
    }

    /// One row per (step, question, answer), sorted newest first.
    ///
    /// Rows without a timestamp sort after all timestamped rows. Ties (and
    /// untimestamped rows) are ordered by the case-insensitive concatenation
    /// of step name and question text.
    pub fn flattened_rows(&self) -> Vec<AnswerRow> {
        let mut rows: Vec<AnswerRow> = Vec::new();
        for step in &self.steps {
            for question in &step.questions {
                for sub in &question.submissions {
                    rows.push(AnswerRow {
                        step_name: step.name.clone(),
                        question_text: question.text.clone(),
                        value: sub.value.clone(),
                        submitted_by: sub.submitted_by.clone(),
                        submitted_at: sub.submitted_at,
                        submission_id: sub.submission_id,
                    });
                }
            }
        }
        rows.sort_by(|a, b| match (a.submitted_at, b.submitted_at) {
            (Some(ta), Some(tb)) => tb
                .cmp(&ta)
                .then_with(|| a.sort_key().cmp(&b.sort_key())),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.sort_key().cmp(&b.sort_key()),
        });
        rows
    }
}

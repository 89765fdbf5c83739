//! HTTP DTOs for checklist endpoints.
//!
//! Requests reuse the ports' write models directly (they are plain serde
//! types); responses get dedicated DTOs so the wire format can evolve
//! independently of the domain.

use serde::{Deserialize, Serialize};

use crate::domain::checklist::{
    AggregatedChecklist, AggregatedQuestion, AggregatedStep, AnswerKind, AnswerRow, AnswerTally,
    Checklist, Question, QuestionSubmission, Step,
};
use crate::domain::submission::FormSubmission;

/// A response option of a single-select question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionResponse {
    pub id: i64,
    pub value: String,
}

/// One question of a checklist structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: i64,
    pub text: String,
    pub kind: AnswerKind,
    pub required: bool,
    pub options: Vec<OptionResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_answer: Option<String>,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.id.as_i64(),
            text: question.text,
            kind: question.kind,
            required: question.required,
            options: question
                .options
                .into_iter()
                .map(|o| OptionResponse {
                    id: o.id.as_i64(),
                    value: o.value,
                })
                .collect(),
            current_answer: question.current_answer,
        }
    }
}

/// One step with its questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResponse {
    pub id: i64,
    pub name: String,
    pub position: i32,
    pub validated: bool,
    pub questions: Vec<QuestionResponse>,
}

impl From<Step> for StepResponse {
    fn from(step: Step) -> Self {
        Self {
            id: step.id.as_i64(),
            name: step.name,
            position: step.position,
            validated: step.validated,
            questions: step.questions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Full checklist structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistResponse {
    pub id: i64,
    pub label: String,
    pub version: String,
    pub description: String,
    pub steps: Vec<StepResponse>,
}

impl From<Checklist> for ChecklistResponse {
    fn from(checklist: Checklist) -> Self {
        Self {
            id: checklist.id.as_i64(),
            label: checklist.label,
            version: checklist.version,
            description: checklist.description,
            steps: checklist.steps.into_iter().map(Into::into).collect(),
        }
    }
}

/// Listing entry: structure summarized to counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistSummaryResponse {
    pub id: i64,
    pub label: String,
    pub version: String,
    pub description: String,
    pub step_count: usize,
    pub question_count: usize,
}

impl From<&Checklist> for ChecklistSummaryResponse {
    fn from(checklist: &Checklist) -> Self {
        Self {
            id: checklist.id.as_i64(),
            label: checklist.label.clone(),
            version: checklist.version.clone(),
            description: checklist.description.clone(),
            step_count: checklist.steps.len(),
            question_count: checklist.question_count(),
        }
    }
}

/// One answer attached to a question in the aggregated view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionAnswerResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<i64>,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    /// False for pseudo-submissions built from fallback values.
    pub real: bool,
}

impl From<&QuestionSubmission> for QuestionAnswerResponse {
    fn from(answer: &QuestionSubmission) -> Self {
        Self {
            submission_id: answer.submission_id.map(|id| id.as_i64()),
            value: answer.value.clone(),
            submitted_by: answer.submitted_by.clone(),
            submitted_at: answer.submitted_at.as_ref().map(|t| t.to_rfc3339()),
            real: answer.is_real(),
        }
    }
}

/// A question with its answers, tally and latest answer resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedQuestionResponse {
    pub id: i64,
    pub text: String,
    pub kind: AnswerKind,
    pub required: bool,
    pub answers: Vec<QuestionAnswerResponse>,
    pub tally: AnswerTally,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<QuestionAnswerResponse>,
}

impl From<&AggregatedQuestion> for AggregatedQuestionResponse {
    fn from(question: &AggregatedQuestion) -> Self {
        Self {
            id: question.id.as_i64(),
            text: question.text.clone(),
            kind: question.kind,
            required: question.required,
            answers: question.submissions.iter().map(Into::into).collect(),
            tally: question.tally(),
            latest: question.latest_answer().map(Into::into),
        }
    }
}

/// A step of the aggregated view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedStepResponse {
    pub id: i64,
    pub name: String,
    pub position: i32,
    pub validated: bool,
    pub questions: Vec<AggregatedQuestionResponse>,
}

impl From<&AggregatedStep> for AggregatedStepResponse {
    fn from(step: &AggregatedStep) -> Self {
        Self {
            id: step.id.as_i64(),
            name: step.name.clone(),
            position: step.position,
            validated: step.validated,
            questions: step.questions.iter().map(Into::into).collect(),
        }
    }
}

/// One flattened answer row, already sorted for tabular display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRowResponse {
    pub step_name: String,
    pub question_text: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<i64>,
}

impl From<AnswerRow> for AnswerRowResponse {
    fn from(row: AnswerRow) -> Self {
        Self {
            step_name: row.step_name,
            question_text: row.question_text,
            value: row.value,
            submitted_by: row.submitted_by,
            submitted_at: row.submitted_at.as_ref().map(|t| t.to_rfc3339()),
            submission_id: row.submission_id.map(|id| id.as_i64()),
        }
    }
}

/// The full aggregated view plus the derived display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResponse {
    pub id: i64,
    pub label: String,
    pub version: String,
    pub description: String,
    pub steps: Vec<AggregatedStepResponse>,
    pub has_real_submissions: bool,
    pub total_count: usize,
    pub count_label: String,
    pub rows: Vec<AnswerRowResponse>,
}

impl From<AggregatedChecklist> for AggregateResponse {
    fn from(view: AggregatedChecklist) -> Self {
        Self {
            steps: view.steps.iter().map(Into::into).collect(),
            has_real_submissions: view.has_real_submissions(),
            total_count: view.total_count(),
            count_label: view.count_label().to_owned(),
            rows: view.flattened_rows().into_iter().map(Into::into).collect(),
            id: view.id.as_i64(),
            label: view.label,
            version: view.version,
            description: view.description,
        }
    }
}

/// One answered question inside a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionAnswerResponse {
    pub question_id: i64,
    pub value: String,
}

/// A structured form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub id: i64,
    pub checklist_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    pub answers: Vec<SubmissionAnswerResponse>,
}

impl From<FormSubmission> for SubmissionResponse {
    fn from(submission: FormSubmission) -> Self {
        Self {
            id: submission.id.as_i64(),
            checklist_id: submission.checklist_id.as_i64(),
            submitted_by: submission.submitted_by,
            submitted_at: submission.submitted_at.as_ref().map(|t| t.to_rfc3339()),
            answers: submission
                .answers
                .into_iter()
                .map(|a| SubmissionAnswerResponse {
                    question_id: a.question_id.as_i64(),
                    value: a.value,
                })
                .collect(),
        }
    }
}

//! HTTP DTOs for question endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::checklist::AnswerKind;
use crate::domain::foundation::{ChecklistId, QuestionId};
use crate::domain::submission::{NewSubmission, SubmissionAnswer};

/// Request to create a question under a step.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestionRequest {
    pub step_id: i64,
    pub text: String,
    pub kind: AnswerKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

/// One answer in a form submission request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswerRequest {
    pub question_id: i64,
    pub value: String,
}

/// Request to submit a filled form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitFormRequest {
    pub checklist_id: i64,
    #[serde(default)]
    pub submitted_by: Option<String>,
    pub answers: Vec<SubmitAnswerRequest>,
}

impl From<SubmitFormRequest> for NewSubmission {
    fn from(req: SubmitFormRequest) -> Self {
        NewSubmission {
            checklist_id: ChecklistId::new(req.checklist_id),
            submitted_by: req.submitted_by,
            answers: req
                .answers
                .into_iter()
                .map(|a| SubmissionAnswer {
                    question_id: QuestionId::new(a.question_id),
                    value: a.value,
                })
                .collect(),
        }
    }
}

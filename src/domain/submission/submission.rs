//! Form submissions: immutable facts recorded at submission time.

use serde::{Deserialize, Serialize};

use crate::domain::checklist::{Checklist, ChecklistError};
use crate::domain::foundation::{ChecklistId, QuestionId, SubmissionId, Timestamp};

/// One answered question inside a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionAnswer {
    pub question_id: QuestionId,
    pub value: String,
}

/// A structured, identified record of answers to some or all questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSubmission {
    pub id: SubmissionId,
    pub checklist_id: ChecklistId,
    pub submitted_by: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub answers: Vec<SubmissionAnswer>,
}

/// A fallback "current answer" value for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAnswer {
    pub question_id: QuestionId,
    pub value: String,
}

/// Write model for an incoming form submission, validated against the
/// checklist structure before being persisted.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub checklist_id: ChecklistId,
    pub submitted_by: Option<String>,
    pub answers: Vec<SubmissionAnswer>,
}

impl NewSubmission {
    /// Validates this submission against the checklist it targets.
    ///
    /// Rules:
    /// - every answer must reference a question of the checklist;
    /// - every answer value must be acceptable for its question's kind;
    /// - every required question must be answered with a non-blank value.
    pub fn validate(&self, checklist: &Checklist) -> Result<(), ChecklistError> {
        for answer in &self.answers {
            let question = checklist
                .find_question(answer.question_id)
                .ok_or(ChecklistError::QuestionNotFound(answer.question_id))?;
            if !question.accepts(&answer.value) {
                return Err(ChecklistError::invalid_answer(
                    answer.question_id,
                    answer.value.clone(),
                ));
            }
        }

        for step in &checklist.steps {
            for question in &step.questions {
                if !question.required {
                    continue;
                }
                let answered = self
                    .answers
                    .iter()
                    .any(|a| a.question_id == question.id && !a.value.trim().is_empty());
                if !answered {
                    return Err(ChecklistError::validation(
                        "answers",
                        format!("required question {} is unanswered", question.id),
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checklist::{AnswerKind, AnswerOption, Question, Step};
    use crate::domain::foundation::{OptionId, StepId};

    fn checklist() -> Checklist {
        Checklist {
            id: ChecklistId::new(1),
            label: "CL".to_string(),
            version: "2018".to_string(),
            description: String::new(),
            steps: vec![Step {
                id: StepId::new(1),
                name: "Étape".to_string(),
                position: 0,
                validated: false,
                questions: vec![
                    Question {
                        id: QuestionId::new(1),
                        text: "Identité correcte".to_string(),
                        kind: AnswerKind::Boolean,
                        required: true,
                        options: vec![],
                        current_answer: None,
                    },
                    Question {
                        id: QuestionId::new(2),
                        text: "Site opératoire".to_string(),
                        kind: AnswerKind::SingleSelect,
                        required: false,
                        options: vec![AnswerOption {
                            id: OptionId::new(1),
                            value: "Gauche".to_string(),
                        }],
                        current_answer: None,
                    },
                ],
            }],
        }
    }

    fn submission(answers: Vec<(i64, &str)>) -> NewSubmission {
        NewSubmission {
            checklist_id: ChecklistId::new(1),
            submitted_by: Some("DUPONT Jean".to_string()),
            answers: answers
                .into_iter()
                .map(|(id, v)| SubmissionAnswer {
                    question_id: QuestionId::new(id),
                    value: v.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn accepts_valid_submission() {
        let sub = submission(vec![(1, "Oui"), (2, "Gauche")]);
        assert!(sub.validate(&checklist()).is_ok());
    }

    #[test]
    fn rejects_unknown_question() {
        let sub = submission(vec![(1, "Oui"), (99, "Oui")]);
        assert!(matches!(
            sub.validate(&checklist()),
            Err(ChecklistError::QuestionNotFound(_))
        ));
    }

    #[test]
    fn rejects_value_outside_question_kind() {
        let sub = submission(vec![(1, "peut-être")]);
        assert!(matches!(
            sub.validate(&checklist()),
            Err(ChecklistError::InvalidAnswer { .. })
        ));
    }

    #[test]
    fn rejects_missing_required_answer() {
        let sub = submission(vec![(2, "Gauche")]);
        assert!(matches!(
            sub.validate(&checklist()),
            Err(ChecklistError::ValidationFailed { .. })
        ));
    }
}

//! AggregateChecklistHandler - builds the per-checklist aggregated view.
//!
//! Merges the checklist structure with whichever answer source is available:
//! structured submissions when any exist, otherwise fallback "current answer"
//! values rendered as pseudo-submissions. The structure fetch is the only
//! hard dependency; both answer sources degrade to empty on error or timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join;
use tokio::time::timeout;
use tracing::warn;

use crate::domain::checklist::{AggregatedChecklist, ChecklistError, QuestionSubmission};
use crate::domain::foundation::{ChecklistId, DomainError};
use crate::domain::submission::{CurrentAnswer, FormSubmission};
use crate::ports::{ChecklistReader, FallbackAnswerReader, SubmissionReader};

/// Upper bound on any single answer-source query. A timeout is treated
/// exactly like a fetch error: that attempt yields an empty result.
const FETCH_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

/// Handler producing the aggregated submission view for one checklist.
pub struct AggregateChecklistHandler {
    structure: Arc<dyn ChecklistReader>,
    submissions: Arc<dyn SubmissionReader>,
    fallback: Arc<dyn FallbackAnswerReader>,
}

impl AggregateChecklistHandler {
    pub fn new(
        structure: Arc<dyn ChecklistReader>,
        submissions: Arc<dyn SubmissionReader>,
        fallback: Arc<dyn FallbackAnswerReader>,
    ) -> Self {
        Self {
            structure,
            submissions,
            fallback,
        }
    }

    pub async fn handle(
        &self,
        checklist_id: ChecklistId,
    ) -> Result<AggregatedChecklist, ChecklistError> {
        // Structure is the hard dependency: absence fails the whole request.
        let structure = self
            .structure
            .structure(checklist_id)
            .await
            .map_err(|e| ChecklistError::infrastructure(e.to_string()))?
            .ok_or(ChecklistError::NotFound(checklist_id))?;

        let mut view = AggregatedChecklist::from_structure(structure);
        let index = view.question_index();

        // The two answer sources are independent; fetch them concurrently.
        let (submissions, fallback_answers) = join(
            self.fetch_submissions(checklist_id),
            self.fetch_fallback_answers(checklist_id),
        )
        .await;

        for submission in &submissions {
            for answer in &submission.answers {
                // Answers referencing unknown questions are skipped.
                let Some(&slot) = index.get(&answer.question_id) else {
                    continue;
                };
                view.push_answer(
                    slot,
                    QuestionSubmission::real(
                        submission.id,
                        answer.value.clone(),
                        submission.submitted_by.clone(),
                        submission.submitted_at,
                    ),
                );
            }
        }

        // Fallback values are used only when no real submission landed
        // anywhere in the checklist. The source choice is per checklist.
        if !view.has_real_submissions() {
            for answer in &fallback_answers {
                let Some(&slot) = index.get(&answer.question_id) else {
                    continue;
                };
                let value = answer.value.trim();
                if value.is_empty() {
                    continue;
                }
                view.push_answer(slot, QuestionSubmission::fallback(value));
            }
        }

        Ok(view)
    }

    /// Ordered cascade over the three submission query shapes; the first
    /// non-empty result wins, everything else degrades to empty.
    async fn fetch_submissions(&self, id: ChecklistId) -> Vec<FormSubmission> {
        if let Some(found) =
            attempt("submissions/by-checklist", self.submissions.list_by_checklist(id)).await
        {
            return found;
        }
        if let Some(found) = attempt(
            "submissions/legacy",
            self.submissions.list_by_checklist_legacy(id),
        )
        .await
        {
            return found;
        }
        attempt("submissions/nested", self.submissions.list_nested(id))
            .await
            .unwrap_or_default()
    }

    /// Ordered cascade over the three fallback query shapes.
    async fn fetch_fallback_answers(&self, id: ChecklistId) -> Vec<CurrentAnswer> {
        if let Some(found) = attempt(
            "fallback/step-join",
            self.fallback.current_by_step_join(id),
        )
        .await
        {
            return found;
        }
        if let Some(found) = attempt(
            "fallback/checklist-column",
            self.fallback.current_by_checklist_column(id),
        )
        .await
        {
            return found;
        }
        attempt("fallback/nested", self.fallback.current_nested(id))
            .await
            .unwrap_or_default()
    }
}

/// Runs one bounded query attempt. Returns `Some` only for a non-empty
/// success; errors and timeouts are logged and collapse to `None`.
async fn attempt<T>(
    query: &'static str,
    fut: impl Future<Output = Result<Vec<T>, DomainError>>,
) -> Option<Vec<T>> {
    match timeout(FETCH_ATTEMPT_TIMEOUT, fut).await {
        Ok(Ok(items)) if !items.is_empty() => Some(items),
        Ok(Ok(_)) => None,
        Ok(Err(e)) => {
            warn!(query, error = %e, "answer source fetch failed, treating as empty");
            None
        }
        Err(_) => {
            warn!(query, "answer source fetch timed out, treating as empty");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checklist::{AnswerKind, Checklist, Question, Step};
    use crate::domain::foundation::{ErrorCode, QuestionId, StepId, SubmissionId, Timestamp};
    use crate::domain::submission::SubmissionAnswer;
    use async_trait::async_trait;

    fn structure() -> Checklist {
        Checklist {
            id: ChecklistId::new(8),
            label: "CHECK-LIST « SÉCURITÉ DU PATIENT »".to_string(),
            version: "2018".to_string(),
            description: String::new(),
            steps: vec![Step {
                id: StepId::new(1),
                name: "Avant induction".to_string(),
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
                        text: "Autorisation signée".to_string(),
                        kind: AnswerKind::Boolean,
                        required: true,
                        options: vec![],
                        current_answer: None,
                    },
                ],
            }],
        }
    }

    fn submission(id: i64, answers: Vec<(i64, &str)>) -> FormSubmission {
        FormSubmission {
            id: SubmissionId::new(id),
            checklist_id: ChecklistId::new(8),
            submitted_by: Some("MARTIN Marie".to_string()),
            submitted_at: Some(Timestamp::now()),
            answers: answers
                .into_iter()
                .map(|(q, v)| SubmissionAnswer {
                    question_id: QuestionId::new(q),
                    value: v.to_string(),
                })
                .collect(),
        }
    }

    struct MockStructure {
        checklist: Option<Checklist>,
    }

    #[async_trait]
    impl ChecklistReader for MockStructure {
        async fn structure(
            &self,
            _id: ChecklistId,
        ) -> Result<Option<Checklist>, DomainError> {
            Ok(self.checklist.clone())
        }

        async fn list(&self) -> Result<Vec<Checklist>, DomainError> {
            Ok(self.checklist.clone().into_iter().collect())
        }
    }

    type Shape<T> = Result<Vec<T>, DomainError>;

    struct MockSubmissions {
        primary: Shape<FormSubmission>,
        legacy: Shape<FormSubmission>,
        nested: Shape<FormSubmission>,
    }

    impl MockSubmissions {
        fn empty() -> Self {
            Self {
                primary: Ok(vec![]),
                legacy: Ok(vec![]),
                nested: Ok(vec![]),
            }
        }

        fn primary(subs: Vec<FormSubmission>) -> Self {
            Self {
                primary: Ok(subs),
                ..Self::empty()
            }
        }
    }

    #[async_trait]
    impl SubmissionReader for MockSubmissions {
        async fn list_by_checklist(
            &self,
            _id: ChecklistId,
        ) -> Result<Vec<FormSubmission>, DomainError> {
            self.primary.clone()
        }

        async fn list_by_checklist_legacy(
            &self,
            _id: ChecklistId,
        ) -> Result<Vec<FormSubmission>, DomainError> {
            self.legacy.clone()
        }

        async fn list_nested(
            &self,
            _id: ChecklistId,
        ) -> Result<Vec<FormSubmission>, DomainError> {
            self.nested.clone()
        }
    }

    struct MockFallback {
        step_join: Shape<CurrentAnswer>,
        column: Shape<CurrentAnswer>,
        nested: Shape<CurrentAnswer>,
    }

    impl MockFallback {
        fn empty() -> Self {
            Self {
                step_join: Ok(vec![]),
                column: Ok(vec![]),
                nested: Ok(vec![]),
            }
        }

        fn step_join(answers: Vec<(i64, &str)>) -> Self {
            Self {
                step_join: Ok(answers
                    .into_iter()
                    .map(|(q, v)| CurrentAnswer {
                        question_id: QuestionId::new(q),
                        value: v.to_string(),
                    })
                    .collect()),
                ..Self::empty()
            }
        }
    }

    #[async_trait]
    impl FallbackAnswerReader for MockFallback {
        async fn current_by_step_join(
            &self,
            _id: ChecklistId,
        ) -> Result<Vec<CurrentAnswer>, DomainError> {
            self.step_join.clone()
        }

        async fn current_by_checklist_column(
            &self,
            _id: ChecklistId,
        ) -> Result<Vec<CurrentAnswer>, DomainError> {
            self.column.clone()
        }

        async fn current_nested(
            &self,
            _id: ChecklistId,
        ) -> Result<Vec<CurrentAnswer>, DomainError> {
            self.nested.clone()
        }
    }

    /// Primary shape hangs forever; the other shapes answer normally.
    struct HangingPrimary {
        nested: Vec<FormSubmission>,
    }

    #[async_trait]
    impl SubmissionReader for HangingPrimary {
        async fn list_by_checklist(
            &self,
            _id: ChecklistId,
        ) -> Result<Vec<FormSubmission>, DomainError> {
            std::future::pending().await
        }

        async fn list_by_checklist_legacy(
            &self,
            _id: ChecklistId,
        ) -> Result<Vec<FormSubmission>, DomainError> {
            Ok(vec![])
        }

        async fn list_nested(
            &self,
            _id: ChecklistId,
        ) -> Result<Vec<FormSubmission>, DomainError> {
            Ok(self.nested.clone())
        }
    }

    fn handler(
        checklist: Option<Checklist>,
        submissions: MockSubmissions,
        fallback: MockFallback,
    ) -> AggregateChecklistHandler {
        AggregateChecklistHandler::new(
            Arc::new(MockStructure { checklist }),
            Arc::new(submissions),
            Arc::new(fallback),
        )
    }

    #[tokio::test]
    async fn missing_checklist_is_a_hard_failure() {
        let h = handler(None, MockSubmissions::empty(), MockFallback::empty());
        let result = h.handle(ChecklistId::new(99)).await;
        assert!(matches!(result, Err(ChecklistError::NotFound(_))));
    }

    #[tokio::test]
    async fn empty_sources_produce_empty_slots() {
        let h = handler(
            Some(structure()),
            MockSubmissions::empty(),
            MockFallback::empty(),
        );
        let view = h.handle(ChecklistId::new(8)).await.unwrap();
        assert_eq!(view.total_count(), 0);
        assert!(view
            .steps
            .iter()
            .all(|s| s.questions.iter().all(|q| q.submissions.is_empty())));
    }

    #[tokio::test]
    async fn real_submissions_fill_matching_slots() {
        let subs = vec![
            submission(10, vec![(1, "Oui"), (2, "Non")]),
            submission(11, vec![(1, "Oui")]),
        ];
        let h = handler(
            Some(structure()),
            MockSubmissions::primary(subs),
            MockFallback::empty(),
        );
        let view = h.handle(ChecklistId::new(8)).await.unwrap();

        assert!(view.has_real_submissions());
        assert_eq!(view.count_label(), "submission(s)");
        assert_eq!(view.total_count(), 2);
        assert_eq!(view.steps[0].questions[0].submissions.len(), 2);
        assert_eq!(view.steps[0].questions[1].submissions.len(), 1);
    }

    #[tokio::test]
    async fn answers_for_unknown_questions_are_skipped() {
        let subs = vec![submission(10, vec![(1, "Oui"), (777, "Non")])];
        let h = handler(
            Some(structure()),
            MockSubmissions::primary(subs),
            MockFallback::empty(),
        );
        let view = h.handle(ChecklistId::new(8)).await.unwrap();
        assert_eq!(view.steps[0].questions[0].submissions.len(), 1);
        assert_eq!(view.total_count(), 1);
    }

    #[tokio::test]
    async fn secondary_query_shape_wins_when_primary_is_empty() {
        let mut submissions = MockSubmissions::empty();
        submissions.legacy = Ok(vec![submission(42, vec![(1, "Oui")])]);
        let h = handler(Some(structure()), submissions, MockFallback::empty());
        let view = h.handle(ChecklistId::new(8)).await.unwrap();
        assert_eq!(view.total_count(), 1);
        assert!(view.has_real_submissions());
    }

    #[tokio::test]
    async fn tertiary_query_shape_is_reached_after_error_and_empty() {
        let mut submissions = MockSubmissions::empty();
        submissions.primary = Err(DomainError::new(ErrorCode::DatabaseError, "boom"));
        submissions.nested = Ok(vec![submission(7, vec![(2, "Non")])]);
        let h = handler(Some(structure()), submissions, MockFallback::empty());
        let view = h.handle(ChecklistId::new(8)).await.unwrap();
        assert_eq!(view.total_count(), 1);
        assert_eq!(view.steps[0].questions[1].submissions[0].value, "Non");
    }

    // Paused clock: the runtime advances time past FETCH_ATTEMPT_TIMEOUT as
    // soon as the hung future is the only pending work.
    #[tokio::test(start_paused = true)]
    async fn hung_query_shape_times_out_like_a_fetch_error() {
        let submissions = HangingPrimary {
            nested: vec![submission(7, vec![(1, "Oui")])],
        };
        let h = AggregateChecklistHandler::new(
            Arc::new(MockStructure {
                checklist: Some(structure()),
            }),
            Arc::new(submissions),
            Arc::new(MockFallback::empty()),
        );

        let view = h.handle(ChecklistId::new(8)).await.unwrap();
        // The cascade fell through the hung primary and the empty legacy
        // shape to the nested one.
        assert!(view.has_real_submissions());
        assert_eq!(view.total_count(), 1);
        assert_eq!(view.steps[0].questions[0].submissions[0].value, "Oui");
    }

    #[tokio::test]
    async fn fallback_answers_become_pseudo_submissions() {
        let h = handler(
            Some(structure()),
            MockSubmissions::empty(),
            MockFallback::step_join(vec![(1, "Oui"), (2, "  ")]),
        );
        let view = h.handle(ChecklistId::new(8)).await.unwrap();

        assert!(!view.has_real_submissions());
        assert_eq!(view.count_label(), "response(s)");
        // Blank value dropped: only question 1 got a pseudo-submission.
        assert_eq!(view.total_count(), 1);
        let pseudo = &view.steps[0].questions[0].submissions[0];
        assert_eq!(pseudo.submission_id, None);
        assert_eq!(pseudo.submitted_by, None);
        assert_eq!(pseudo.submitted_at, None);
        assert!(view.steps[0].questions[1].submissions.is_empty());
    }

    #[tokio::test]
    async fn fallback_is_ignored_when_real_submissions_exist() {
        let h = handler(
            Some(structure()),
            MockSubmissions::primary(vec![submission(10, vec![(1, "Oui")])]),
            MockFallback::step_join(vec![(1, "Non"), (2, "Non")]),
        );
        let view = h.handle(ChecklistId::new(8)).await.unwrap();
        assert_eq!(view.total_count(), 1);
        assert!(view.steps[0].questions[1].submissions.is_empty());
        assert!(view.steps[0].questions[0].submissions.iter().all(|s| s.is_real()));
    }

    #[tokio::test]
    async fn failing_sources_degrade_to_empty_view() {
        let submissions = MockSubmissions {
            primary: Err(DomainError::new(ErrorCode::DatabaseError, "a")),
            legacy: Err(DomainError::new(ErrorCode::DatabaseError, "b")),
            nested: Err(DomainError::new(ErrorCode::DatabaseError, "c")),
        };
        let fallback = MockFallback {
            step_join: Err(DomainError::new(ErrorCode::DatabaseError, "d")),
            column: Err(DomainError::new(ErrorCode::DatabaseError, "e")),
            nested: Err(DomainError::new(ErrorCode::DatabaseError, "f")),
        };
        let h = handler(Some(structure()), submissions, fallback);
        let view = h.handle(ChecklistId::new(8)).await.unwrap();
        assert_eq!(view.total_count(), 0);
    }
}

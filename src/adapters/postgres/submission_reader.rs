//! PostgreSQL implementations of the answer-source reader ports.
//!
//! Each port exposes three query shapes; the aggregator decides which result
//! to keep. The shapes differ only in how they locate rows: the canonical
//! checklist key, the legacy joins, or the per-step collection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::{HashMap, HashSet};

use crate::domain::foundation::{ChecklistId, DomainError, QuestionId, SubmissionId, Timestamp};
use crate::domain::submission::{CurrentAnswer, FormSubmission, SubmissionAnswer};
use crate::ports::{FallbackAnswerReader, SubmissionReader};

use super::db_err;

/// PostgreSQL implementation of SubmissionReader.
#[derive(Clone)]
pub struct PostgresSubmissionReader {
    pool: PgPool,
}

impl PostgresSubmissionReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Maps submission rows and attaches their answers in one batch query.
    async fn with_answers(
        &self,
        checklist_id: ChecklistId,
        rows: Vec<PgRow>,
    ) -> Result<Vec<FormSubmission>, DomainError> {
        let mut submissions = Vec::with_capacity(rows.len());
        for row in rows {
            let submitted_at: Option<DateTime<Utc>> = row
                .try_get("submitted_at")
                .map_err(|e| db_err("submission timestamp", e))?;
            submissions.push(FormSubmission {
                id: SubmissionId::new(row.try_get("id").map_err(|e| db_err("submission id", e))?),
                checklist_id,
                submitted_by: row
                    .try_get("submitted_by")
                    .map_err(|e| db_err("submission author", e))?,
                submitted_at: submitted_at.map(Timestamp::from_datetime),
                answers: Vec::new(),
            });
        }
        if submissions.is_empty() {
            return Ok(submissions);
        }
        let ids: Vec<i64> = submissions.iter().map(|s| s.id.as_i64()).collect();

        let answer_rows = sqlx::query(
            r#"
            SELECT submission_id, question_id, value
            FROM submission_answers
            WHERE submission_id = ANY($1)
            ORDER BY submission_id, id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("fetch submission answers", e))?;

        let mut by_submission: HashMap<i64, Vec<SubmissionAnswer>> = HashMap::new();
        for row in answer_rows {
            let submission_id: i64 = row
                .try_get("submission_id")
                .map_err(|e| db_err("answer submission", e))?;
            by_submission
                .entry(submission_id)
                .or_default()
                .push(SubmissionAnswer {
                    question_id: QuestionId::new(
                        row.try_get("question_id")
                            .map_err(|e| db_err("answer question", e))?,
                    ),
                    value: row.try_get("value").map_err(|e| db_err("answer value", e))?,
                });
        }
        for submission in &mut submissions {
            submission.answers = by_submission.remove(&submission.id.as_i64()).unwrap_or_default();
        }
        Ok(submissions)
    }
}

#[async_trait]
impl SubmissionReader for PostgresSubmissionReader {
    async fn list_by_checklist(
        &self,
        checklist_id: ChecklistId,
    ) -> Result<Vec<FormSubmission>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, submitted_by, submitted_at
            FROM submissions
            WHERE checklist_id = $1
            ORDER BY id
            "#,
        )
        .bind(checklist_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("list submissions", e))?;

        self.with_answers(checklist_id, rows).await
    }

    async fn list_by_checklist_legacy(
        &self,
        checklist_id: ChecklistId,
    ) -> Result<Vec<FormSubmission>, DomainError> {
        // Legacy rows carry no checklist key; reach them through the
        // questions their answers point at.
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT sub.id, sub.submitted_by, sub.submitted_at
            FROM submissions sub
            JOIN submission_answers a ON a.submission_id = sub.id
            JOIN questions q ON q.id = a.question_id
            JOIN steps s ON s.id = q.step_id
            WHERE sub.checklist_id IS NULL AND s.checklist_id = $1
            ORDER BY sub.id
            "#,
        )
        .bind(checklist_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("list legacy submissions", e))?;

        self.with_answers(checklist_id, rows).await
    }

    async fn list_nested(
        &self,
        checklist_id: ChecklistId,
    ) -> Result<Vec<FormSubmission>, DomainError> {
        let step_rows = sqlx::query(
            "SELECT id FROM steps WHERE checklist_id = $1 ORDER BY ordinal, id",
        )
        .bind(checklist_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("list steps for nested read", e))?;

        // Collect step by step and dedupe: a submission answering questions
        // of several steps must appear once.
        let mut seen: HashSet<i64> = HashSet::new();
        let mut collected: Vec<PgRow> = Vec::new();
        for step_row in step_rows {
            let step_id: i64 = step_row.try_get("id").map_err(|e| db_err("step id", e))?;
            let rows = sqlx::query(
                r#"
                SELECT DISTINCT sub.id, sub.submitted_by, sub.submitted_at
                FROM submissions sub
                JOIN submission_answers a ON a.submission_id = sub.id
                JOIN questions q ON q.id = a.question_id
                WHERE q.step_id = $1
                ORDER BY sub.id
                "#,
            )
            .bind(step_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("list nested submissions", e))?;
            for row in rows {
                let id: i64 = row.try_get("id").map_err(|e| db_err("submission id", e))?;
                if seen.insert(id) {
                    collected.push(row);
                }
            }
        }

        self.with_answers(checklist_id, collected).await
    }
}

/// PostgreSQL implementation of FallbackAnswerReader.
#[derive(Clone)]
pub struct PostgresFallbackAnswerReader {
    pool: PgPool,
}

impl PostgresFallbackAnswerReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_current_answers(rows: Vec<PgRow>) -> Result<Vec<CurrentAnswer>, DomainError> {
    rows.into_iter()
        .map(|row| {
            Ok(CurrentAnswer {
                question_id: QuestionId::new(
                    row.try_get("id").map_err(|e| db_err("question id", e))?,
                ),
                value: row
                    .try_get("current_answer")
                    .map_err(|e| db_err("current answer", e))?,
            })
        })
        .collect()
}

#[async_trait]
impl FallbackAnswerReader for PostgresFallbackAnswerReader {
    async fn current_by_step_join(
        &self,
        checklist_id: ChecklistId,
    ) -> Result<Vec<CurrentAnswer>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT q.id, q.current_answer
            FROM questions q
            JOIN steps s ON s.id = q.step_id
            WHERE s.checklist_id = $1 AND q.current_answer IS NOT NULL
            ORDER BY s.ordinal, q.id
            "#,
        )
        .bind(checklist_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("current answers by step join", e))?;

        map_current_answers(rows)
    }

    async fn current_by_checklist_column(
        &self,
        checklist_id: ChecklistId,
    ) -> Result<Vec<CurrentAnswer>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, current_answer
            FROM questions
            WHERE checklist_id = $1 AND current_answer IS NOT NULL
            ORDER BY id
            "#,
        )
        .bind(checklist_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("current answers by legacy column", e))?;

        map_current_answers(rows)
    }

    async fn current_nested(
        &self,
        checklist_id: ChecklistId,
    ) -> Result<Vec<CurrentAnswer>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT q.id, q.current_answer
            FROM checklists c
            JOIN steps s ON s.checklist_id = c.id
            JOIN questions q ON q.step_id = s.id
            WHERE c.id = $1 AND q.current_answer IS NOT NULL
            ORDER BY s.ordinal, q.id
            "#,
        )
        .bind(checklist_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("current answers nested", e))?;

        map_current_answers(rows)
    }
}

//! PostgreSQL implementation of SubmissionRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, SubmissionId, Timestamp};
use crate::domain::submission::{FormSubmission, NewSubmission};
use crate::ports::SubmissionRepository;

use super::db_err;

/// PostgreSQL implementation of SubmissionRepository.
#[derive(Clone)]
pub struct PostgresSubmissionRepository {
    pool: PgPool,
}

impl PostgresSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRepository for PostgresSubmissionRepository {
    async fn record(&self, submission: &NewSubmission) -> Result<FormSubmission, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_err("begin record submission", e))?;

        let row = sqlx::query(
            r#"
            INSERT INTO submissions (checklist_id, submitted_by)
            VALUES ($1, $2)
            RETURNING id, submitted_at
            "#,
        )
        .bind(submission.checklist_id.as_i64())
        .bind(&submission.submitted_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_err("insert submission", e))?;
        let id: i64 = row.try_get("id").map_err(|e| db_err("submission id", e))?;
        let submitted_at: DateTime<Utc> = row
            .try_get("submitted_at")
            .map_err(|e| db_err("submission timestamp", e))?;

        for answer in &submission.answers {
            sqlx::query(
                r#"
                INSERT INTO submission_answers (submission_id, question_id, value)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(id)
            .bind(answer.question_id.as_i64())
            .bind(&answer.value)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_err("insert answer", e))?;

            // Keep the fallback source in step with the latest submission.
            sqlx::query("UPDATE questions SET current_answer = $2 WHERE id = $1")
                .bind(answer.question_id.as_i64())
                .bind(&answer.value)
                .execute(&mut *tx)
                .await
                .map_err(|e| db_err("refresh current answer", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_err("commit record submission", e))?;

        Ok(FormSubmission {
            id: SubmissionId::new(id),
            checklist_id: submission.checklist_id,
            submitted_by: submission.submitted_by.clone(),
            submitted_at: Some(Timestamp::from_datetime(submitted_at)),
            answers: submission.answers.clone(),
        })
    }
}

//! PostgreSQL implementation of QuestionRepository.
//!
//! Option reconciliation on update: options missing from the update are
//! deleted, kept ones rewritten, new ones inserted. A kind change away from
//! single-select drops the whole option set.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashMap;

use crate::domain::checklist::{AnswerKind, AnswerOption, Question};
use crate::domain::foundation::{
    ChecklistId, DomainError, ErrorCode, OptionId, QuestionId, StepId,
};
use crate::ports::{QuestionRepository, QuestionUpdate};

use super::db_err;

/// PostgreSQL implementation of QuestionRepository.
#[derive(Clone)]
pub struct PostgresQuestionRepository {
    pool: PgPool,
}

impl PostgresQuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Maps question rows and attaches their options in one batch query.
    async fn with_options(&self, rows: Vec<PgRow>) -> Result<Vec<Question>, DomainError> {
        let mut questions = Vec::with_capacity(rows.len());
        for row in rows {
            questions.push(map_question(&row)?);
        }
        if questions.is_empty() {
            return Ok(questions);
        }
        let ids: Vec<i64> = questions.iter().map(|q| q.id.as_i64()).collect();

        let option_rows = sqlx::query(
            r#"
            SELECT id, question_id, value
            FROM question_options
            WHERE question_id = ANY($1)
            ORDER BY question_id, id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("fetch options", e))?;

        let mut by_question: HashMap<i64, Vec<AnswerOption>> = HashMap::new();
        for row in option_rows {
            let question_id: i64 = row
                .try_get("question_id")
                .map_err(|e| db_err("option question", e))?;
            by_question.entry(question_id).or_default().push(AnswerOption {
                id: OptionId::new(row.try_get("id").map_err(|e| db_err("option id", e))?),
                value: row.try_get("value").map_err(|e| db_err("option value", e))?,
            });
        }
        for question in &mut questions {
            question.options = by_question.remove(&question.id.as_i64()).unwrap_or_default();
        }
        Ok(questions)
    }
}

fn map_question(row: &PgRow) -> Result<Question, DomainError> {
    let kind: String = row.try_get("kind").map_err(|e| db_err("question kind", e))?;
    Ok(Question {
        id: QuestionId::new(row.try_get("id").map_err(|e| db_err("question id", e))?),
        text: row.try_get("text").map_err(|e| db_err("question text", e))?,
        kind: kind
            .parse::<AnswerKind>()
            .map_err(|e| DomainError::new(ErrorCode::UnknownAnswerKind, e))?,
        required: row
            .try_get("required")
            .map_err(|e| db_err("question required", e))?,
        options: Vec::new(),
        current_answer: row
            .try_get("current_answer")
            .map_err(|e| db_err("question answer", e))?,
    })
}

#[async_trait]
impl QuestionRepository for PostgresQuestionRepository {
    async fn create(
        &self,
        step_id: StepId,
        text: &str,
        kind: AnswerKind,
        required: bool,
        options: &[String],
    ) -> Result<Question, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_err("begin create question", e))?;

        let step = sqlx::query("SELECT id FROM steps WHERE id = $1")
            .bind(step_id.as_i64())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_err("check step", e))?;
        if step.is_none() {
            return Err(DomainError::new(
                ErrorCode::StepNotFound,
                format!("step {} not found", step_id),
            ));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO questions (step_id, text, kind, required)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(step_id.as_i64())
        .bind(text)
        .bind(kind.as_str())
        .bind(required)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_err("insert question", e))?;
        let question_id: i64 = row.try_get("id").map_err(|e| db_err("question id", e))?;

        let mut stored_options = Vec::new();
        if kind == AnswerKind::SingleSelect {
            for value in options {
                let row = sqlx::query(
                    "INSERT INTO question_options (question_id, value) VALUES ($1, $2) RETURNING id",
                )
                .bind(question_id)
                .bind(value)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| db_err("insert option", e))?;
                stored_options.push(AnswerOption {
                    id: OptionId::new(row.try_get("id").map_err(|e| db_err("option id", e))?),
                    value: value.clone(),
                });
            }
        }

        tx.commit()
            .await
            .map_err(|e| db_err("commit create question", e))?;

        Ok(Question {
            id: QuestionId::new(question_id),
            text: text.to_owned(),
            kind,
            required,
            options: stored_options,
            current_answer: None,
        })
    }

    async fn find(&self, id: QuestionId) -> Result<Option<Question>, DomainError> {
        let row = sqlx::query(
            "SELECT id, text, kind, required, current_answer FROM questions WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("fetch question", e))?;

        match row {
            Some(row) => Ok(self.with_options(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_by_checklist(
        &self,
        checklist_id: ChecklistId,
    ) -> Result<Vec<Question>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT q.id, q.text, q.kind, q.required, q.current_answer
            FROM questions q
            JOIN steps s ON s.id = q.step_id
            WHERE s.checklist_id = $1
            ORDER BY s.ordinal, q.id
            "#,
        )
        .bind(checklist_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("list questions by checklist", e))?;

        self.with_options(rows).await
    }

    async fn list_by_step(&self, step_id: StepId) -> Result<Vec<Question>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, text, kind, required, current_answer
            FROM questions
            WHERE step_id = $1
            ORDER BY id
            "#,
        )
        .bind(step_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("list questions by step", e))?;

        self.with_options(rows).await
    }

    async fn update(&self, id: QuestionId, update: &QuestionUpdate) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_err("begin update question", e))?;

        let result = match &update.current_answer {
            Some(answer) => sqlx::query(
                r#"
                UPDATE questions
                SET text = $2, kind = $3, required = $4, current_answer = $5
                WHERE id = $1
                "#,
            )
            .bind(id.as_i64())
            .bind(&update.text)
            .bind(update.kind.as_str())
            .bind(update.required)
            .bind(answer)
            .execute(&mut *tx)
            .await,
            None => sqlx::query(
                "UPDATE questions SET text = $2, kind = $3, required = $4 WHERE id = $1",
            )
            .bind(id.as_i64())
            .bind(&update.text)
            .bind(update.kind.as_str())
            .bind(update.required)
            .execute(&mut *tx)
            .await,
        }
        .map_err(|e| db_err("update question", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::QuestionNotFound,
                format!("question {} not found", id),
            ));
        }

        if update.kind == AnswerKind::SingleSelect {
            let kept: Vec<i64> = update
                .options
                .iter()
                .filter_map(|o| o.id.map(|id| id.as_i64()))
                .collect();
            sqlx::query(
                "DELETE FROM question_options WHERE question_id = $1 AND id != ALL($2)",
            )
            .bind(id.as_i64())
            .bind(&kept)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_err("prune options", e))?;

            for option in &update.options {
                match option.id {
                    Some(option_id) => {
                        sqlx::query(
                            "UPDATE question_options SET value = $3 WHERE id = $1 AND question_id = $2",
                        )
                        .bind(option_id.as_i64())
                        .bind(id.as_i64())
                        .bind(&option.value)
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| db_err("rewrite option", e))?;
                    }
                    None => {
                        sqlx::query(
                            "INSERT INTO question_options (question_id, value) VALUES ($1, $2)",
                        )
                        .bind(id.as_i64())
                        .bind(&option.value)
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| db_err("insert option", e))?;
                    }
                }
            }
        } else {
            sqlx::query("DELETE FROM question_options WHERE question_id = $1")
                .bind(id.as_i64())
                .execute(&mut *tx)
                .await
                .map_err(|e| db_err("clear options", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_err("commit update question", e))
    }

    async fn delete(&self, id: QuestionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("delete question", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::QuestionNotFound,
                format!("question {} not found", id),
            ));
        }
        Ok(())
    }
}

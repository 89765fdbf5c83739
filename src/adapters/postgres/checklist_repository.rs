//! PostgreSQL implementation of ChecklistRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::checklist::{AnswerKind, AnswerOption, Checklist, Question, Step};
use crate::domain::foundation::{
    ChecklistId, DomainError, ErrorCode, OptionId, QuestionId, StepId,
};
use crate::ports::{ChecklistRepository, ChecklistUpdate, NewChecklist};

use super::db_err;

/// PostgreSQL implementation of ChecklistRepository.
#[derive(Clone)]
pub struct PostgresChecklistRepository {
    pool: PgPool,
}

impl PostgresChecklistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn insert_question(
    tx: &mut Transaction<'_, Postgres>,
    step_id: StepId,
    text: &str,
    kind: AnswerKind,
    required: bool,
    option_values: &[String],
) -> Result<Question, DomainError> {
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
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| db_err("insert question", e))?;
    let question_id: i64 = row.try_get("id").map_err(|e| db_err("question id", e))?;

    let mut options = Vec::new();
    // Options only make sense for single-select questions; other kinds have
    // their choices fixed by the kind itself.
    if kind == AnswerKind::SingleSelect {
        for value in option_values {
            let row = sqlx::query(
                "INSERT INTO question_options (question_id, value) VALUES ($1, $2) RETURNING id",
            )
            .bind(question_id)
            .bind(value)
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| db_err("insert option", e))?;
            options.push(AnswerOption {
                id: OptionId::new(row.try_get("id").map_err(|e| db_err("option id", e))?),
                value: value.clone(),
            });
        }
    }

    Ok(Question {
        id: QuestionId::new(question_id),
        text: text.to_owned(),
        kind,
        required,
        options,
        current_answer: None,
    })
}

#[async_trait]
impl ChecklistRepository for PostgresChecklistRepository {
    async fn create(&self, checklist: &NewChecklist) -> Result<Checklist, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_err("begin create checklist", e))?;

        let row = sqlx::query(
            r#"
            INSERT INTO checklists (label, version, description)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&checklist.label)
        .bind(&checklist.version)
        .bind(&checklist.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_err("insert checklist", e))?;
        let checklist_id: i64 = row.try_get("id").map_err(|e| db_err("checklist id", e))?;

        let mut steps = Vec::with_capacity(checklist.steps.len());
        for (ordinal, new_step) in checklist.steps.iter().enumerate() {
            let row = sqlx::query(
                r#"
                INSERT INTO steps (checklist_id, name, ordinal, validated)
                VALUES ($1, $2, $3, FALSE)
                RETURNING id
                "#,
            )
            .bind(checklist_id)
            .bind(&new_step.name)
            .bind(ordinal as i32)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| db_err("insert step", e))?;
            let step_id = StepId::new(row.try_get("id").map_err(|e| db_err("step id", e))?);

            let mut questions = Vec::with_capacity(new_step.questions.len());
            for new_question in &new_step.questions {
                questions.push(
                    insert_question(
                        &mut tx,
                        step_id,
                        &new_question.text,
                        new_question.kind,
                        new_question.required,
                        &new_question.options,
                    )
                    .await?,
                );
            }

            steps.push(Step {
                id: step_id,
                name: new_step.name.clone(),
                position: ordinal as i32,
                validated: false,
                questions,
            });
        }

        tx.commit()
            .await
            .map_err(|e| db_err("commit create checklist", e))?;

        Ok(Checklist {
            id: ChecklistId::new(checklist_id),
            label: checklist.label.clone(),
            version: checklist.version.clone(),
            description: checklist.description.clone(),
            steps,
        })
    }

    async fn update(
        &self,
        id: ChecklistId,
        update: &ChecklistUpdate,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE checklists SET label = $2, version = $3, description = $4 WHERE id = $1",
        )
        .bind(id.as_i64())
        .bind(&update.label)
        .bind(&update.version)
        .bind(&update.description)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("update checklist", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ChecklistNotFound,
                format!("checklist {} not found", id),
            ));
        }
        Ok(())
    }

    async fn delete(&self, id: ChecklistId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM checklists WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("delete checklist", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ChecklistNotFound,
                format!("checklist {} not found", id),
            ));
        }
        Ok(())
    }
}

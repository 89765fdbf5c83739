//! PostgreSQL implementation of ChecklistReader.
//!
//! Loads a checklist's full structure in four queries (checklists, steps,
//! questions, options) and assembles the tree in memory.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashMap;

use crate::domain::checklist::{AnswerKind, AnswerOption, Checklist, Question, Step};
use crate::domain::foundation::{
    ChecklistId, DomainError, ErrorCode, OptionId, QuestionId, StepId,
};
use crate::ports::ChecklistReader;

use super::db_err;

/// PostgreSQL implementation of ChecklistReader.
#[derive(Clone)]
pub struct PostgresChecklistReader {
    pool: PgPool,
}

impl PostgresChecklistReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads steps, questions and options for the given checklist rows and
    /// assembles full trees, preserving the input row order.
    async fn assemble(&self, rows: Vec<PgRow>) -> Result<Vec<Checklist>, DomainError> {
        let mut checklists: Vec<Checklist> = Vec::with_capacity(rows.len());
        let mut position: HashMap<i64, usize> = HashMap::new();
        for row in rows {
            let id: i64 = row.try_get("id").map_err(|e| db_err("checklist id", e))?;
            position.insert(id, checklists.len());
            checklists.push(Checklist {
                id: ChecklistId::new(id),
                label: row.try_get("label").map_err(|e| db_err("checklist label", e))?,
                version: row
                    .try_get("version")
                    .map_err(|e| db_err("checklist version", e))?,
                description: row
                    .try_get("description")
                    .map_err(|e| db_err("checklist description", e))?,
                steps: Vec::new(),
            });
        }
        if checklists.is_empty() {
            return Ok(checklists);
        }
        let ids: Vec<i64> = checklists.iter().map(|c| c.id.as_i64()).collect();

        let option_rows = sqlx::query(
            r#"
            SELECT o.id, o.question_id, o.value
            FROM question_options o
            JOIN questions q ON q.id = o.question_id
            JOIN steps s ON s.id = q.step_id
            WHERE s.checklist_id = ANY($1)
            ORDER BY o.question_id, o.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("fetch options", e))?;

        let mut options_by_question: HashMap<i64, Vec<AnswerOption>> = HashMap::new();
        for row in option_rows {
            let question_id: i64 = row.try_get("question_id").map_err(|e| db_err("option question", e))?;
            options_by_question
                .entry(question_id)
                .or_default()
                .push(AnswerOption {
                    id: OptionId::new(row.try_get("id").map_err(|e| db_err("option id", e))?),
                    value: row.try_get("value").map_err(|e| db_err("option value", e))?,
                });
        }

        let question_rows = sqlx::query(
            r#"
            SELECT q.id, q.step_id, q.text, q.kind, q.required, q.current_answer
            FROM questions q
            JOIN steps s ON s.id = q.step_id
            WHERE s.checklist_id = ANY($1)
            ORDER BY q.step_id, q.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("fetch questions", e))?;

        let mut questions_by_step: HashMap<i64, Vec<Question>> = HashMap::new();
        for row in question_rows {
            let step_id: i64 = row.try_get("step_id").map_err(|e| db_err("question step", e))?;
            let id: i64 = row.try_get("id").map_err(|e| db_err("question id", e))?;
            let kind: String = row.try_get("kind").map_err(|e| db_err("question kind", e))?;
            questions_by_step.entry(step_id).or_default().push(Question {
                id: QuestionId::new(id),
                text: row.try_get("text").map_err(|e| db_err("question text", e))?,
                kind: kind
                    .parse::<AnswerKind>()
                    .map_err(|e| DomainError::new(ErrorCode::UnknownAnswerKind, e))?,
                required: row
                    .try_get("required")
                    .map_err(|e| db_err("question required", e))?,
                options: options_by_question.remove(&id).unwrap_or_default(),
                current_answer: row
                    .try_get("current_answer")
                    .map_err(|e| db_err("question answer", e))?,
            });
        }

        let step_rows = sqlx::query(
            r#"
            SELECT id, checklist_id, name, ordinal, validated
            FROM steps
            WHERE checklist_id = ANY($1)
            ORDER BY checklist_id, ordinal, id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("fetch steps", e))?;

        for row in step_rows {
            let checklist_id: i64 = row
                .try_get("checklist_id")
                .map_err(|e| db_err("step checklist", e))?;
            let id: i64 = row.try_get("id").map_err(|e| db_err("step id", e))?;
            let step = Step {
                id: StepId::new(id),
                name: row.try_get("name").map_err(|e| db_err("step name", e))?,
                position: row.try_get("ordinal").map_err(|e| db_err("step ordinal", e))?,
                validated: row
                    .try_get("validated")
                    .map_err(|e| db_err("step validated", e))?,
                questions: questions_by_step.remove(&id).unwrap_or_default(),
            };
            if let Some(&idx) = position.get(&checklist_id) {
                checklists[idx].steps.push(step);
            }
        }

        Ok(checklists)
    }
}

#[async_trait]
impl ChecklistReader for PostgresChecklistReader {
    async fn structure(&self, id: ChecklistId) -> Result<Option<Checklist>, DomainError> {
        let row = sqlx::query(
            "SELECT id, label, version, description FROM checklists WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("fetch checklist", e))?;

        match row {
            Some(row) => Ok(self.assemble(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Checklist>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, label, version, description FROM checklists ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("list checklists", e))?;

        self.assemble(rows).await
    }
}

use crate::error::{Error, Result};
use crate::models::test::{NewTest, Test};
use crate::models::test_answer::{NewTestAnswer, TestAnswer};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;
use validator::Validate;

const TEST_COLUMNS: &str = "id, device_id, selected_region_id, total_score, breakdown, \
     summary_line, reasons, next_steps, created_at";

const ANSWER_COLUMNS: &str =
    "id, test_id, question_id, text_answer, selected_options, extra, created_at";

/// Attaches one answer to `test_id`. Works on a pool or inside a
/// unit-of-work; a missing Test is reported as `NotFound`.
pub async fn insert_answer<'e, E>(
    executor: E,
    test_id: Uuid,
    new: &NewTestAnswer,
) -> Result<TestAnswer>
where
    E: PgExecutor<'e>,
{
    new.validate()?;

    let answer = sqlx::query_as::<_, TestAnswer>(&format!(
        r#"
        INSERT INTO test_answers (id, test_id, question_id, text_answer, selected_options, extra)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {ANSWER_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(test_id)
    .bind(&new.question_id)
    .bind(&new.text_answer)
    .bind(&new.selected_options)
    .bind(&new.extra)
    .fetch_one(executor)
    .await
    .map_err(Error::from)
    .map_err(|e| {
        if e.is_foreign_key_violation() {
            Error::NotFound(format!("Test {} not found", test_id))
        } else {
            e
        }
    })?;

    Ok(answer)
}

#[derive(Clone)]
pub struct TestService {
    pool: PgPool,
}

impl TestService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a Test. A `selected_region_id` that does not reference an
    /// existing Region is rejected by the foreign key.
    pub async fn create(&self, new: NewTest) -> Result<Test> {
        new.validate()?;

        let test = sqlx::query_as::<_, Test>(&format!(
            r#"
            INSERT INTO tests (
                id, device_id, selected_region_id, total_score, breakdown,
                summary_line, reasons, next_steps
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {TEST_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new.device_id)
        .bind(new.selected_region_id)
        .bind(new.total_score)
        .bind(&new.breakdown)
        .bind(&new.summary_line)
        .bind(&new.reasons)
        .bind(&new.next_steps)
        .fetch_one(&self.pool)
        .await?;

        Ok(test)
    }

    pub async fn get(&self, id: Uuid) -> Result<Test> {
        sqlx::query_as::<_, Test>(&format!("SELECT {TEST_COLUMNS} FROM tests WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Test {} not found", id)))
    }

    /// Newest first.
    pub async fn list_by_device(&self, device_id: &str) -> Result<Vec<Test>> {
        let tests = sqlx::query_as::<_, Test>(&format!(
            r#"
            SELECT {TEST_COLUMNS} FROM tests
            WHERE device_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(device_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tests)
    }

    pub async fn add_answer(&self, test_id: Uuid, new: NewTestAnswer) -> Result<TestAnswer> {
        insert_answer(&self.pool, test_id, &new).await
    }

    /// Answers in the order they were recorded.
    pub async fn list_answers(&self, test_id: Uuid) -> Result<Vec<TestAnswer>> {
        let answers = sqlx::query_as::<_, TestAnswer>(&format!(
            r#"
            SELECT {ANSWER_COLUMNS} FROM test_answers
            WHERE test_id = $1
            ORDER BY created_at ASC, id ASC
            "#
        ))
        .bind(test_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(answers)
    }

    /// Deletes a Test together with all of its answers.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM tests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Test {} not found", id)));
        }
        Ok(())
    }
}

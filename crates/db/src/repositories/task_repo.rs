//! Repository for the `tasks` table.

use recallr_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, TaskWithDeck};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, deck_id, task_time, color, completed, created_at, updated_at";

/// Provides CRUD operations for planner tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// The deck must belong to the same user; otherwise nothing is inserted
    /// and `None` is returned.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (user_id, deck_id, task_time, color)
             SELECT $1, d.id, $3, $4
             FROM decks d
             WHERE d.id = $2 AND d.user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.user_id)
            .bind(input.deck_id)
            .bind(input.task_time)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// List a user's tasks with their deck names, ordered by time of day.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TaskWithDeck>, sqlx::Error> {
        sqlx::query_as::<_, TaskWithDeck>(
            "SELECT t.id, t.user_id, t.deck_id, d.name AS deck_name, t.task_time,
                    t.color, t.completed, t.created_at, t.updated_at
             FROM tasks t
             JOIN decks d ON d.id = t.deck_id
             WHERE t.user_id = $1
             ORDER BY t.task_time, t.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Set a task's completed flag.
    ///
    /// Returns `None` if no task with `id` belongs to `user_id`.
    pub async fn set_completed(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        completed: bool,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET completed = $3
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .bind(completed)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Planner task entity model and DTOs.

use chrono::NaiveTime;
use recallr_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub user_id: DbId,
    pub deck_id: DbId,
    pub task_time: NaiveTime,
    pub color: String,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A task joined with the name of the deck it schedules.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskWithDeck {
    pub id: DbId,
    pub user_id: DbId,
    pub deck_id: DbId,
    pub deck_name: String,
    pub task_time: NaiveTime,
    pub color: String,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a task. The time is already parsed.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub user_id: DbId,
    pub deck_id: DbId,
    pub task_time: NaiveTime,
    pub color: String,
}

//! Flashcard entity model and DTOs.

use recallr_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A flashcard row from the `flashcards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Flashcard {
    pub id: DbId,
    pub deck_id: DbId,
    pub term: String,
    pub definition: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a single flashcard outside of a bulk sync.
#[derive(Debug, Clone)]
pub struct CreateFlashcard {
    pub term: String,
    pub definition: String,
}

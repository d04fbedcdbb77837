//! Deck entity model, list projections, and DTOs.

use recallr_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A deck row from the `decks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Deck {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    /// Free-text grouping label; empty when the deck is in no folder.
    pub folder: String,
    pub color: String,
    pub description: String,
    pub archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Deck listing row with the number of flashcards it holds.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeckSummary {
    pub id: DbId,
    pub name: String,
    pub folder: String,
    pub color: String,
    pub archived: bool,
    pub term_count: i64,
}

/// Minimal deck reference used by the planner's deck picker.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeckRef {
    pub id: DbId,
    pub name: String,
}

/// A folder: every deck of one user sharing the same `folder` label.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FolderSummary {
    pub name: String,
    pub deck_count: i64,
}

/// DTO for inserting a deck. Optional labels are already normalized.
#[derive(Debug, Clone)]
pub struct CreateDeck {
    pub user_id: DbId,
    pub name: String,
    pub folder: String,
    pub color: String,
    pub description: String,
}

/// DTO for replacing a deck's editable fields.
#[derive(Debug, Clone)]
pub struct UpdateDeck {
    pub name: String,
    pub folder: String,
    pub color: String,
    pub description: String,
}

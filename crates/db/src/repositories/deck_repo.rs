//! Repository for the `decks` table.
//!
//! Every lookup and mutation is scoped by owner, so a deck belonging to
//! another user behaves exactly like a missing one.

use recallr_core::types::DbId;
use sqlx::PgPool;

use crate::models::deck::{CreateDeck, Deck, DeckRef, DeckSummary, FolderSummary, UpdateDeck};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, name, folder, color, description, archived, created_at, updated_at";

/// Provides CRUD operations for decks.
pub struct DeckRepo;

impl DeckRepo {
    /// Insert a new deck, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDeck) -> Result<Deck, sqlx::Error> {
        let query = format!(
            "INSERT INTO decks (user_id, name, folder, color, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deck>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.folder)
            .bind(&input.color)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a deck by ID, only if it belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Deck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM decks WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Deck>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's decks with their flashcard counts, oldest first.
    pub async fn list_summaries(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DeckSummary>, sqlx::Error> {
        sqlx::query_as::<_, DeckSummary>(
            "SELECT d.id, d.name, d.folder, d.color, d.archived,
                    COALESCE(f.term_count, 0) AS term_count
             FROM decks d
             LEFT JOIN (
                 SELECT deck_id, COUNT(*) AS term_count
                 FROM flashcards
                 GROUP BY deck_id
             ) f ON f.deck_id = d.id
             WHERE d.user_id = $1
             ORDER BY d.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// List a user's non-archived decks (id and name only).
    pub async fn list_ongoing(pool: &PgPool, user_id: DbId) -> Result<Vec<DeckRef>, sqlx::Error> {
        sqlx::query_as::<_, DeckRef>(
            "SELECT id, name FROM decks
             WHERE user_id = $1 AND archived = false
             ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Group a user's decks by folder label.
    ///
    /// Decks without a folder are grouped under the empty string.
    pub async fn list_folders(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FolderSummary>, sqlx::Error> {
        sqlx::query_as::<_, FolderSummary>(
            "SELECT folder AS name, COUNT(*) AS deck_count
             FROM decks
             WHERE user_id = $1
             GROUP BY folder
             ORDER BY folder",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Replace a deck's editable fields.
    ///
    /// Returns `None` if no deck with `id` belongs to `user_id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateDeck,
    ) -> Result<Option<Deck>, sqlx::Error> {
        let query = format!(
            "UPDATE decks SET
                name = $3,
                folder = $4,
                color = $5,
                description = $6
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deck>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.folder)
            .bind(&input.color)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the archived flag. Returns `true` if the deck exists for the user.
    pub async fn set_archived(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        archived: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE decks SET archived = $3 WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .bind(archived)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a deck. Flashcards and tasks cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM decks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

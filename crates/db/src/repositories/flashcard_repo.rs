//! Repository for the `flashcards` table, including bulk sync.

use recallr_core::flashcard::{plan_sync, SyncEntry, SyncSummary};
use recallr_core::types::DbId;
use sqlx::PgPool;

use crate::models::flashcard::{CreateFlashcard, Flashcard};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, deck_id, term, definition, created_at, updated_at";

/// Provides CRUD and bulk-sync operations for flashcards.
pub struct FlashcardRepo;

impl FlashcardRepo {
    /// Insert a single flashcard under a deck, returning the created row.
    pub async fn create(
        pool: &PgPool,
        deck_id: DbId,
        input: &CreateFlashcard,
    ) -> Result<Flashcard, sqlx::Error> {
        let query = format!(
            "INSERT INTO flashcards (deck_id, term, definition)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Flashcard>(&query)
            .bind(deck_id)
            .bind(&input.term)
            .bind(&input.definition)
            .fetch_one(pool)
            .await
    }

    /// List a deck's flashcards in storage (id) order.
    pub async fn list_by_deck(pool: &PgPool, deck_id: DbId) -> Result<Vec<Flashcard>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM flashcards WHERE deck_id = $1 ORDER BY id");
        sqlx::query_as::<_, Flashcard>(&query)
            .bind(deck_id)
            .fetch_all(pool)
            .await
    }

    /// List every flashcard across all decks owned by `user_id`.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Flashcard>, sqlx::Error> {
        sqlx::query_as::<_, Flashcard>(
            "SELECT f.id, f.deck_id, f.term, f.definition, f.created_at, f.updated_at
             FROM flashcards f
             JOIN decks d ON d.id = f.deck_id
             WHERE d.user_id = $1
             ORDER BY f.deck_id, f.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Make the deck's stored flashcards match `entries` exactly.
    ///
    /// Runs in one transaction: the deck row is locked `FOR UPDATE` so
    /// concurrent syncs of the same deck serialize, stored ids missing from
    /// the submission are deleted in one statement, submitted ids are updated
    /// (scoped by deck, and only when the text changed), and id-less entries
    /// are inserted in submission order. Any failure rolls back every step.
    ///
    /// Returns [`sqlx::Error::RowNotFound`] if the deck does not exist.
    pub async fn sync(
        pool: &PgPool,
        deck_id: DbId,
        entries: Vec<SyncEntry>,
    ) -> Result<SyncSummary, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query_scalar::<_, DbId>("SELECT id FROM decks WHERE id = $1 FOR UPDATE")
            .bind(deck_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        let existing_ids: Vec<DbId> =
            sqlx::query_scalar("SELECT id FROM flashcards WHERE deck_id = $1")
                .bind(deck_id)
                .fetch_all(&mut *tx)
                .await?;

        let plan = plan_sync(&existing_ids, entries);
        let mut summary = SyncSummary {
            skipped: plan.foreign_ids.len() as u64,
            ..SyncSummary::default()
        };

        if !plan.foreign_ids.is_empty() {
            tracing::warn!(
                deck_id,
                foreign_ids = ?plan.foreign_ids,
                "Bulk sync referenced flashcards outside the deck; ignoring them"
            );
        }

        if plan.is_empty() {
            tx.commit().await?;
            tracing::debug!(deck_id, "Flashcard sync had nothing to write");
            return Ok(summary);
        }

        // 1. Delete stored cards that were not submitted.
        if !plan.delete_ids.is_empty() {
            let result = sqlx::query("DELETE FROM flashcards WHERE deck_id = $1 AND id = ANY($2)")
                .bind(deck_id)
                .bind(plan.delete_ids.as_slice())
                .execute(&mut *tx)
                .await?;
            summary.deleted = result.rows_affected();
        }

        // 2. Overwrite submitted cards whose text changed.
        for card in &plan.updates {
            let result = sqlx::query(
                "UPDATE flashcards SET term = $3, definition = $4
                 WHERE id = $1 AND deck_id = $2
                   AND (term <> $3 OR definition <> $4)",
            )
            .bind(card.id)
            .bind(deck_id)
            .bind(&card.term)
            .bind(&card.definition)
            .execute(&mut *tx)
            .await?;
            summary.updated += result.rows_affected();
        }

        // 3. Insert new cards, preserving submission order.
        if !plan.inserts.is_empty() {
            let terms: Vec<&str> = plan.inserts.iter().map(|c| c.term.as_str()).collect();
            let definitions: Vec<&str> =
                plan.inserts.iter().map(|c| c.definition.as_str()).collect();
            let result = sqlx::query(
                "INSERT INTO flashcards (deck_id, term, definition)
                 SELECT $1, u.term, u.definition
                 FROM UNNEST($2::text[], $3::text[]) WITH ORDINALITY AS u(term, definition, ord)
                 ORDER BY u.ord",
            )
            .bind(deck_id)
            .bind(&terms)
            .bind(&definitions)
            .execute(&mut *tx)
            .await?;
            summary.inserted = result.rows_affected();
        }

        tx.commit().await?;

        tracing::debug!(
            deck_id,
            deleted = summary.deleted,
            updated = summary.updated,
            inserted = summary.inserted,
            skipped = summary.skipped,
            "Flashcard sync committed"
        );

        Ok(summary)
    }
}

//! Integration tests for `FlashcardRepo::sync` against a real database.
//!
//! Covers exact deletion, updates, insertion order, idempotence, cross-deck
//! isolation, rollback on failure, and serialization of concurrent syncs.

use recallr_core::flashcard::{SyncEntry, SyncSummary};
use recallr_core::types::DbId;
use recallr_db::models::deck::CreateDeck;
use recallr_db::models::flashcard::{CreateFlashcard, Flashcard};
use recallr_db::models::user::CreateUser;
use recallr_db::repositories::{DeckRepo, FlashcardRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, name: &str) -> DbId {
    let input = CreateUser {
        username: name.to_string(),
        email: format!("{name}@test.com"),
        password_hash: "not-a-real-hash".to_string(),
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

async fn new_deck(pool: &PgPool, user_id: DbId, name: &str) -> DbId {
    let input = CreateDeck {
        user_id,
        name: name.to_string(),
        folder: String::new(),
        color: "#5D9CFF".to_string(),
        description: String::new(),
    };
    DeckRepo::create(pool, &input).await.unwrap().id
}

async fn add_card(pool: &PgPool, deck_id: DbId, term: &str, definition: &str) -> DbId {
    let input = CreateFlashcard {
        term: term.to_string(),
        definition: definition.to_string(),
    };
    FlashcardRepo::create(pool, deck_id, &input).await.unwrap().id
}

fn existing(id: DbId, term: &str, definition: &str) -> SyncEntry {
    SyncEntry {
        id: Some(id),
        term: term.to_string(),
        definition: definition.to_string(),
    }
}

fn fresh(term: &str, definition: &str) -> SyncEntry {
    SyncEntry {
        id: None,
        term: term.to_string(),
        definition: definition.to_string(),
    }
}

/// Current cards as `(id, term, definition)` in storage order.
async fn snapshot(pool: &PgPool, deck_id: DbId) -> Vec<(DbId, String, String)> {
    FlashcardRepo::list_by_deck(pool, deck_id)
        .await
        .unwrap()
        .into_iter()
        .map(|c: Flashcard| (c.id, c.term, c.definition))
        .collect()
}

/// A deck owned by a fresh user, seeded with the given `(term, definition)` cards.
async fn seeded_deck(pool: &PgPool, cards: &[(&str, &str)]) -> (DbId, Vec<DbId>) {
    let user_id = new_user(pool, "syncer").await;
    let deck_id = new_deck(pool, user_id, "Deck").await;
    let mut ids = Vec::new();
    for (term, definition) in cards {
        ids.push(add_card(pool, deck_id, term, definition).await);
    }
    (deck_id, ids)
}

// ---------------------------------------------------------------------------
// Reconciliation properties
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_exact_deletion(pool: PgPool) {
    let (deck_id, ids) = seeded_deck(&pool, &[("one", "1"), ("two", "2"), ("three", "3")]).await;

    let summary = FlashcardRepo::sync(
        &pool,
        deck_id,
        vec![
            existing(ids[0], "one", "1"),
            existing(ids[2], "three!", "3!"),
        ],
    )
    .await
    .unwrap();

    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.inserted, 0);
    assert_eq!(
        snapshot(&pool, deck_id).await,
        vec![
            (ids[0], "one".to_string(), "1".to_string()),
            (ids[2], "three!".to_string(), "3!".to_string()),
        ]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pure_insertion_into_empty_deck(pool: PgPool) {
    let (deck_id, _) = seeded_deck(&pool, &[]).await;

    let summary = FlashcardRepo::sync(
        &pool,
        deck_id,
        vec![fresh("alpha", "first"), fresh("beta", "second")],
    )
    .await
    .unwrap();

    assert_eq!(
        summary,
        SyncSummary {
            deleted: 0,
            updated: 0,
            inserted: 2,
            skipped: 0,
        }
    );

    let cards = snapshot(&pool, deck_id).await;
    let terms: Vec<_> = cards.iter().map(|(_, t, _)| t.as_str()).collect();
    assert_eq!(terms, vec!["alpha", "beta"], "insertion keeps submission order");
    assert!(cards[0].0 < cards[1].0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mixed_batch(pool: PgPool) {
    let (deck_id, ids) = seeded_deck(&pool, &[("x", "dx"), ("y", "dy")]).await;

    FlashcardRepo::sync(
        &pool,
        deck_id,
        vec![existing(ids[0], "x2", "d2"), fresh("z", "dz")],
    )
    .await
    .unwrap();

    let cards = snapshot(&pool, deck_id).await;
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0], (ids[0], "x2".to_string(), "d2".to_string()));
    assert!(cards.iter().all(|(id, _, _)| *id != ids[1]), "y must be deleted");
    assert_eq!(cards[1].1, "z");
    assert_eq!(cards[1].2, "dz");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resubmitting_same_sequence_changes_nothing(pool: PgPool) {
    let (deck_id, _) = seeded_deck(&pool, &[("old", "gone")]).await;

    FlashcardRepo::sync(&pool, deck_id, vec![fresh("a", "1"), fresh("b", "2")])
        .await
        .unwrap();

    // Resubmit the stored state using the ids assigned by the first call.
    let after_first = FlashcardRepo::list_by_deck(&pool, deck_id).await.unwrap();
    let resubmission: Vec<_> = after_first
        .iter()
        .map(|c| existing(c.id, &c.term, &c.definition))
        .collect();

    let summary = FlashcardRepo::sync(&pool, deck_id, resubmission)
        .await
        .unwrap();
    assert_eq!(summary.rows_changed(), 0);

    let after_second = FlashcardRepo::list_by_deck(&pool, deck_id).await.unwrap();
    assert_eq!(after_first.len(), after_second.len());
    for (before, after) in after_first.iter().zip(&after_second) {
        assert_eq!(before.id, after.id);
        assert_eq!(
            before.updated_at, after.updated_at,
            "unchanged cards must not be rewritten"
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeated_id_applies_last_text_once(pool: PgPool) {
    let (deck_id, ids) = seeded_deck(&pool, &[("orig", "0")]).await;
    let card = ids[0];
    let submission = || vec![existing(card, "a", "1"), existing(card, "b", "2")];

    let first = FlashcardRepo::sync(&pool, deck_id, submission())
        .await
        .unwrap();
    assert_eq!(first.updated, 1);

    let second = FlashcardRepo::sync(&pool, deck_id, submission())
        .await
        .unwrap();
    assert_eq!(second.rows_changed(), 0);

    assert_eq!(
        snapshot(&pool, deck_id).await,
        vec![(card, "b".to_string(), "2".to_string())]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cross_deck_ids_are_not_touched(pool: PgPool) {
    let user_id = new_user(&pool, "owner").await;
    let mine = new_deck(&pool, user_id, "Mine").await;
    let other = new_deck(&pool, user_id, "Other").await;
    let own_card = add_card(&pool, mine, "mine", "m").await;
    let other_card = add_card(&pool, other, "theirs", "t").await;

    let summary = FlashcardRepo::sync(
        &pool,
        mine,
        vec![
            existing(own_card, "mine", "m"),
            existing(other_card, "hijacked", "h"),
        ],
    )
    .await
    .unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.rows_changed(), 0);
    assert_eq!(
        snapshot(&pool, other).await,
        vec![(other_card, "theirs".to_string(), "t".to_string())]
    );
    assert_eq!(snapshot(&pool, mine).await.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_submission_clears_deck(pool: PgPool) {
    let (deck_id, _) = seeded_deck(&pool, &[("a", "1"), ("b", "2")]).await;

    let summary = FlashcardRepo::sync(&pool, deck_id, vec![]).await.unwrap();

    assert_eq!(summary.deleted, 2);
    assert!(snapshot(&pool, deck_id).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_deck_with_only_stale_ids_writes_nothing(pool: PgPool) {
    let (deck_id, _) = seeded_deck(&pool, &[]).await;

    let summary = FlashcardRepo::sync(&pool, deck_id, vec![existing(424_242, "x", "y")])
        .await
        .unwrap();

    assert_eq!(
        summary,
        SyncSummary {
            skipped: 1,
            ..SyncSummary::default()
        }
    );
    assert!(snapshot(&pool, deck_id).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_deck_is_row_not_found(pool: PgPool) {
    let result = FlashcardRepo::sync(&pool, 987_654, vec![fresh("a", "1")]).await;
    assert!(matches!(result, Err(sqlx::Error::RowNotFound)));
}

// ---------------------------------------------------------------------------
// Atomicity and concurrency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_insert_rolls_back_deletes_and_updates(pool: PgPool) {
    let (deck_id, ids) = seeded_deck(&pool, &[("keep", "k"), ("drop", "d")]).await;
    let before = snapshot(&pool, deck_id).await;

    // An empty term passes straight to the database and violates the CHECK
    // constraint after the delete and update have already run.
    let result = FlashcardRepo::sync(
        &pool,
        deck_id,
        vec![existing(ids[0], "changed", "c"), fresh("", "invalid")],
    )
    .await;

    assert!(result.is_err());
    assert_eq!(snapshot(&pool, deck_id).await, before);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_syncs_serialize(pool: PgPool) {
    let (deck_id, ids) = seeded_deck(&pool, &[("one", "1"), ("two", "2")]).await;

    let a = FlashcardRepo::sync(&pool, deck_id, vec![existing(ids[0], "a", "a"), fresh("A", "A")]);
    let b = FlashcardRepo::sync(&pool, deck_id, vec![existing(ids[1], "b", "b"), fresh("B", "B")]);
    let (ra, rb) = tokio::join!(a, b);
    ra.unwrap();
    rb.unwrap();

    // Whichever sync ran second sees the other's result as stored state,
    // deletes all of it, and leaves only its own new card.
    let terms: Vec<_> = snapshot(&pool, deck_id)
        .await
        .into_iter()
        .map(|(_, t, _)| t)
        .collect();
    assert!(
        terms == vec!["A".to_string()] || terms == vec!["B".to_string()],
        "interleaved result: {terms:?}"
    );
}

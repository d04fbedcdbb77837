//! Handlers for flashcards, including the bulk reconciliation endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use recallr_core::flashcard::{parse_sync_entries, validate_card_text, SyncSummary};
use recallr_core::types::DbId;
use recallr_db::models::flashcard::{CreateFlashcard, Flashcard};
use recallr_db::repositories::FlashcardRepo;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppResult;
use crate::handlers::deck::owned_deck;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for adding a single card.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CardRequest {
    pub term: String,
    pub definition: String,
}

/// Request body for `POST /decks/{id}/flashcards/bulk`.
///
/// `flashcards` is kept as raw JSON so a non-array value is reported as a
/// validation error rather than a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct BulkSyncRequest {
    #[serde(default)]
    pub flashcards: Value,
}

/// Response body for a successful bulk sync.
#[derive(Debug, Serialize)]
pub struct BulkSyncResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub summary: SyncSummary,
}

/// GET /api/v1/decks/{id}/flashcards
pub async fn list_by_deck(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(deck_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Flashcard>>>> {
    owned_deck(&state, deck_id, auth.user_id).await?;
    let cards = FlashcardRepo::list_by_deck(&state.pool, deck_id).await?;
    Ok(Json(DataResponse { data: cards }))
}

/// POST /api/v1/decks/{id}/flashcards
///
/// Appends one card without touching the rest of the deck.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(deck_id): Path<DbId>,
    Json(input): Json<CardRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Flashcard>>)> {
    validate_card_text(&input.term, &input.definition)?;
    owned_deck(&state, deck_id, auth.user_id).await?;

    let card = FlashcardRepo::create(
        &state.pool,
        deck_id,
        &CreateFlashcard {
            term: input.term,
            definition: input.definition,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: card })))
}

/// POST /api/v1/decks/{id}/flashcards/bulk
///
/// Replaces the deck's cards with the submitted sequence. The body is fully
/// validated before the deck is looked up, and the sync itself commits or
/// rolls back as a whole.
pub async fn bulk_sync(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(deck_id): Path<DbId>,
    Json(input): Json<BulkSyncRequest>,
) -> AppResult<Json<BulkSyncResponse>> {
    let entries = parse_sync_entries(&input.flashcards)?;
    owned_deck(&state, deck_id, auth.user_id).await?;

    let submitted = entries.len();
    let summary = FlashcardRepo::sync(&state.pool, deck_id, entries).await?;

    tracing::info!(
        deck_id,
        user_id = auth.user_id,
        submitted,
        deleted = summary.deleted,
        updated = summary.updated,
        inserted = summary.inserted,
        skipped = summary.skipped,
        "Flashcards synced"
    );

    Ok(Json(BulkSyncResponse {
        message: "Flashcards updated successfully!",
        summary,
    }))
}

/// GET /api/v1/flashcards
pub async fn list_for_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Flashcard>>>> {
    let cards = FlashcardRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: cards }))
}

//! Handlers for the `/decks` resource.
//!
//! Every handler acts on the caller's decks only; a deck owned by someone
//! else is reported as not found.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use recallr_core::deck::{normalize_label, validate_deck_input};
use recallr_core::error::CoreError;
use recallr_core::types::DbId;
use recallr_db::models::deck::{CreateDeck, Deck, DeckRef, DeckSummary, UpdateDeck};
use recallr_db::repositories::DeckRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for creating or replacing a deck.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeckRequest {
    pub name: String,
    pub folder: Option<String>,
    pub color: String,
    pub description: Option<String>,
}

impl DeckRequest {
    /// Validate and normalize into the stored field values.
    fn into_fields(self) -> Result<UpdateDeck, CoreError> {
        validate_deck_input(&self.name, &self.color)?;
        Ok(UpdateDeck {
            name: self.name.trim().to_string(),
            folder: normalize_label(self.folder.as_deref()),
            color: self.color.trim().to_string(),
            description: normalize_label(self.description.as_deref()),
        })
    }
}

fn deck_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Deck", id })
}

/// Load a deck the caller owns, or fail with 404.
pub(crate) async fn owned_deck(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Deck> {
    DeckRepo::find_for_user(&state.pool, id, user_id)
        .await?
        .ok_or_else(|| deck_not_found(id))
}

/// POST /api/v1/decks
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<DeckRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Deck>>)> {
    let fields = input.into_fields()?;
    let deck = DeckRepo::create(
        &state.pool,
        &CreateDeck {
            user_id: auth.user_id,
            name: fields.name,
            folder: fields.folder,
            color: fields.color,
            description: fields.description,
        },
    )
    .await?;

    tracing::info!(deck_id = deck.id, user_id = auth.user_id, "Deck created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: deck })))
}

/// GET /api/v1/decks
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<DeckSummary>>>> {
    let decks = DeckRepo::list_summaries(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: decks }))
}

/// GET /api/v1/decks/ongoing
pub async fn list_ongoing(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<DeckRef>>>> {
    let decks = DeckRepo::list_ongoing(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: decks }))
}

/// GET /api/v1/decks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Deck>>> {
    let deck = owned_deck(&state, id, auth.user_id).await?;
    Ok(Json(DataResponse { data: deck }))
}

/// PUT /api/v1/decks/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<DeckRequest>,
) -> AppResult<Json<DataResponse<Deck>>> {
    let fields = input.into_fields()?;
    let deck = DeckRepo::update(&state.pool, id, auth.user_id, &fields)
        .await?
        .ok_or_else(|| deck_not_found(id))?;
    Ok(Json(DataResponse { data: deck }))
}

/// DELETE /api/v1/decks/{id}
///
/// Flashcards and planner tasks referencing the deck are removed with it.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if DeckRepo::delete(&state.pool, id, auth.user_id).await? {
        tracing::info!(deck_id = id, user_id = auth.user_id, "Deck deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(deck_not_found(id))
    }
}

/// POST /api/v1/decks/{id}/archive
pub async fn archive(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    set_archived(&state, id, auth.user_id, true).await
}

/// POST /api/v1/decks/{id}/recover
pub async fn recover(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    set_archived(&state, id, auth.user_id, false).await
}

async fn set_archived(
    state: &AppState,
    id: DbId,
    user_id: DbId,
    archived: bool,
) -> AppResult<StatusCode> {
    if DeckRepo::set_archived(&state.pool, id, user_id, archived).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(deck_not_found(id))
    }
}

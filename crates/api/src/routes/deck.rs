//! Route definitions for the `/decks` resource, including the deck-scoped
//! flashcard routes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{deck, flashcard};
use crate::state::AppState;

/// Routes mounted at `/decks`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /ongoing                 -> list_ongoing
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// POST   /{id}/archive            -> archive
/// POST   /{id}/recover            -> recover
/// GET    /{id}/flashcards         -> flashcard::list_by_deck
/// POST   /{id}/flashcards         -> flashcard::create
/// POST   /{id}/flashcards/bulk    -> flashcard::bulk_sync
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(deck::list).post(deck::create))
        .route("/ongoing", get(deck::list_ongoing))
        .route(
            "/{id}",
            get(deck::get_by_id).put(deck::update).delete(deck::delete),
        )
        .route("/{id}/archive", post(deck::archive))
        .route("/{id}/recover", post(deck::recover))
        .route(
            "/{id}/flashcards",
            get(flashcard::list_by_deck).post(flashcard::create),
        )
        .route("/{id}/flashcards/bulk", post(flashcard::bulk_sync))
}

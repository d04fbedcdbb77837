pub mod auth;
pub mod deck;
pub mod flashcard;
pub mod folder;
pub mod health;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/signup                          signup (public)
/// /auth/login                           login (public)
/// /auth/refresh                         refresh (public)
/// /auth/logout                          logout
///
/// /decks                                list, create
/// /decks/ongoing                        non-archived decks
/// /decks/{id}                           get, update, delete
/// /decks/{id}/archive                   archive (POST)
/// /decks/{id}/recover                   recover (POST)
/// /decks/{id}/flashcards                list, create
/// /decks/{id}/flashcards/bulk           bulk reconciliation (POST)
///
/// /flashcards                           every card of the caller
/// /folders                              decks grouped by folder label
///
/// /tasks                                list, create
/// /tasks/{id}                           set completed (PATCH), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/decks", deck::router())
        .nest("/flashcards", flashcard::router())
        .nest("/folders", folder::router())
        .nest("/tasks", task::router())
}

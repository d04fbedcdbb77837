use axum::routing::get;
use axum::Router;

use crate::handlers::flashcard;
use crate::state::AppState;

/// Routes mounted at `/flashcards`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(flashcard::list_for_user))
}

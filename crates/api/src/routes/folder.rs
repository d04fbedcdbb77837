use axum::routing::get;
use axum::Router;

use crate::handlers::folder;
use crate::state::AppState;

/// Routes mounted at `/folders`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(folder::list))
}

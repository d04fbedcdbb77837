//! Handler for folder listing. Folders are deck labels, not stored entities.

use axum::extract::State;
use axum::Json;
use recallr_db::models::deck::FolderSummary;
use recallr_db::repositories::DeckRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/folders
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<FolderSummary>>>> {
    let folders = DeckRepo::list_folders(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: folders }))
}

//! Per-user history and bookmarks.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::auth::CurrentUser;
use crate::api::state::SharedState;
use crate::database;
use crate::error::AppError;
use crate::models::{Bookmark, HistoryEntry, NewBookmark};

/// GET /api/user/history
pub async fn history(
    State(state): State<SharedState>,
    user: CurrentUser,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let entries = database::get_user_history(&state.pool, &user.id).await?;
    Ok(Json(entries))
}

/// GET /api/user/bookmarks
pub async fn list_bookmarks(
    State(state): State<SharedState>,
    user: CurrentUser,
) -> Result<Json<Vec<Bookmark>>, AppError> {
    let bookmarks = database::get_user_bookmarks(&state.pool, &user.id).await?;
    Ok(Json(bookmarks))
}

/// POST /api/user/bookmarks
pub async fn add_bookmark(
    State(state): State<SharedState>,
    user: CurrentUser,
    payload: Result<Json<NewBookmark>, JsonRejection>,
) -> Result<(StatusCode, Json<Bookmark>), AppError> {
    let Json(request) = payload?;
    let bookmark = database::add_bookmark(&state.pool, &user.id, request.herb_id).await?;
    Ok((StatusCode::CREATED, Json(bookmark)))
}

/// DELETE /api/user/bookmarks/{herb_id}
pub async fn remove_bookmark(
    State(state): State<SharedState>,
    user: CurrentUser,
    herb_id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(herb_id) = herb_id?;
    database::remove_bookmark(&state.pool, &user.id, herb_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

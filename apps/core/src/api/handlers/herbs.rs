//! Herb catalog: public browsing and admin CRUD.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;
use validator::Validate;

use crate::api::auth::AdminUser;
use crate::api::state::SharedState;
use crate::database;
use crate::error::AppError;
use crate::models::{Herb, HerbFilter, HerbUpdate, NewHerb};

/// GET /api/herbs - Published herbs, optionally filtered
pub async fn list_herbs(
    State(state): State<SharedState>,
    filter: Result<Query<HerbFilter>, QueryRejection>,
) -> Result<Json<Vec<Herb>>, AppError> {
    let Query(filter) = filter?;
    let herbs = database::list_herbs(&state.pool, &filter).await?;
    Ok(Json(herbs))
}

/// GET /api/herbs/{id}
pub async fn get_herb(
    State(state): State<SharedState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Herb>, AppError> {
    let Path(id) = id?;
    let herb = database::get_herb(&state.pool, id).await?;
    Ok(Json(herb))
}

/// POST /api/admin/herbs
pub async fn create_herb(
    State(state): State<SharedState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<NewHerb>, JsonRejection>,
) -> Result<(StatusCode, Json<Herb>), AppError> {
    let Json(new_herb) = payload?;
    new_herb.validate()?;

    let herb = database::create_herb(&state.pool, new_herb).await?;
    info!(admin = %admin.id, herb_id = herb.id, "Herb created");
    Ok((StatusCode::CREATED, Json(herb)))
}

/// PUT /api/admin/herbs/{id}
pub async fn update_herb(
    State(state): State<SharedState>,
    AdminUser(admin): AdminUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<HerbUpdate>, JsonRejection>,
) -> Result<Json<Herb>, AppError> {
    let Path(id) = id?;
    let Json(update) = payload?;
    update.validate()?;

    let herb = database::update_herb(&state.pool, id, update).await?;
    info!(admin = %admin.id, herb_id = id, "Herb updated");
    Ok(Json(herb))
}

/// DELETE /api/admin/herbs/{id}
pub async fn delete_herb(
    State(state): State<SharedState>,
    AdminUser(admin): AdminUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    database::delete_herb(&state.pool, id).await?;
    info!(admin = %admin.id, herb_id = id, "Herb deleted");
    Ok(StatusCode::NO_CONTENT)
}

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::{info, instrument};

use crate::api::auth::CurrentUser;
use crate::api::state::SharedState;
use crate::database;
use crate::error::AppError;
use crate::models::RecommendRequest;
use crate::nlp::Recommendation;

/// POST /api/ai/recommend - Analyze symptoms and record the result in the user's history
///
/// The rate limit is checked before the body is parsed, so malformed requests
/// also consume quota.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn recommend(
    State(state): State<SharedState>,
    user: CurrentUser,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<Recommendation>, AppError> {
    state
        .rate_limiter
        .check(&user.id)
        .map_err(|wait| AppError::RateLimited {
            retry_after: wait.as_secs().max(1),
        })?;

    let Json(request) = payload?;
    let symptoms = request.symptoms_text()?;

    let recommendation = state.analyzer.analyze(symptoms);
    database::add_history(&state.pool, &user.id, symptoms, &recommendation).await?;

    info!("Recommendation generated: {}", recommendation.summary());
    Ok(Json(recommendation))
}

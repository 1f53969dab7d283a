//! Read-only accuracy reports.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::domain::WordItem;
use crate::state::AppState;

use super::ApiResult;

#[derive(Debug, Serialize)]
pub struct AverageHitRate {
    /// Null until some learner has answered a word they had seen before
    pub average_hit_rate: Option<f64>,
}

/// GET /dashboard/avgLeitnersHitrate
pub async fn average_hit_rate(State(state): State<AppState>) -> ApiResult<AverageHitRate> {
    let average_hit_rate = state.trainer.average_learner_hit_rate()?;
    Ok(Json(AverageHitRate { average_hit_rate }))
}

/// GET /dashboard/difficultwords/lesson/{level}
pub async fn difficult_words_for_lesson(
    State(state): State<AppState>,
    Path(level): Path<i64>,
) -> ApiResult<Vec<WordItem>> {
    Ok(Json(state.trainer.hardest_words(Some(level))?))
}

/// GET /dashboard/easywords/lesson/{level}
pub async fn easy_words_for_lesson(
    State(state): State<AppState>,
    Path(level): Path<i64>,
) -> ApiResult<Vec<WordItem>> {
    Ok(Json(state.trainer.easiest_words(Some(level))?))
}

pub async fn global_difficult_words(State(state): State<AppState>) -> ApiResult<Vec<WordItem>> {
    Ok(Json(state.trainer.hardest_words(None)?))
}

pub async fn global_easy_words(State(state): State<AppState>) -> ApiResult<Vec<WordItem>> {
    Ok(Json(state.trainer.easiest_words(None)?))
}

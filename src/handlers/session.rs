//! Study session routes.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::domain::{SessionWord, WordItem};
use crate::state::AppState;

use super::ApiResult;

/// GET /username/{name}/level/{level}
pub async fn with_wrong_answers(
    State(state): State<AppState>,
    Path((name, level)): Path<(String, i64)>,
) -> ApiResult<Vec<SessionWord>> {
    let words = state.trainer.session_with_distractors(&name, level)?;
    Ok(Json(words))
}

/// GET /username/{name}/level/{level}/without_wrong_answers
pub async fn without_wrong_answers(
    State(state): State<AppState>,
    Path((name, level)): Path<(String, i64)>,
) -> ApiResult<Vec<WordItem>> {
    let words = state.trainer.session_words(&name, level)?;
    Ok(Json(words))
}

use axum::{
    extract::{Path, State},
    Json,
};

use crate::srs::AnswerOutcome;
use crate::state::AppState;

use super::{ApiError, ApiResult};

fn parse_result(raw: &str) -> Result<bool, ApiError> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ApiError::BadRequest(format!(
            "result must be true or false, got {:?}",
            other
        ))),
    }
}

/// PUT /username/{name}/wordId/{word_id}/result/{result}
pub async fn record_result(
    State(state): State<AppState>,
    Path((name, word_id, result)): Path<(String, i64, String)>,
) -> ApiResult<AnswerOutcome> {
    let correct = parse_result(&result)?;
    let outcome = state.trainer.record_answer(&name, word_id, correct)?;
    Ok(Json(outcome))
}

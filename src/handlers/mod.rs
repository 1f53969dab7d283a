//! JSON routes over the trainer.
//!
//! Handlers are thin: parse the path, call the trainer, map errors to a
//! status code with a `{"error": ...}` body.

pub mod answer;
pub mod dashboard;
pub mod session;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use crate::error::{SrsError, StoreError};
use crate::state::AppState;

/// Error response for every route
#[derive(Debug)]
pub enum ApiError {
    Srs(SrsError),
    BadRequest(String),
}

impl From<SrsError> for ApiError {
    fn from(err: SrsError) -> Self {
        ApiError::Srs(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Srs(SrsError::StoreUnavailable(err))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Srs(err) => match err {
                SrsError::LearnerNotFound(_) | SrsError::WordNotFound(_) => StatusCode::NOT_FOUND,
                SrsError::InsufficientDistractors { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                SrsError::ConcurrentUpdate(_) => StatusCode::CONFLICT,
                SrsError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Srs(err) => err.to_string(),
        };

        if status.is_server_error() {
            tracing::error!("{}", message);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, message);
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/username/{name}/level/{level}", get(session::with_wrong_answers))
        .route(
            "/username/{name}/level/{level}/without_wrong_answers",
            get(session::without_wrong_answers),
        )
        .route(
            "/username/{name}/wordId/{word_id}/result/{result}",
            put(answer::record_result),
        )
        .route("/dashboard/avgLeitnersHitrate", get(dashboard::average_hit_rate))
        .route(
            "/dashboard/difficultwords/lesson/{level}",
            get(dashboard::difficult_words_for_lesson),
        )
        .route(
            "/dashboard/easywords/lesson/{level}",
            get(dashboard::easy_words_for_lesson),
        )
        .route("/dashboard/globaldifficultwords", get(dashboard::global_difficult_words))
        .route("/dashboard/globaleasywords", get(dashboard::global_easy_words))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use corteya_core::{
    errors::BookingError,
    models::session::{GetSessionResponse, SaveSessionRequest, Session},
};
use corteya_db::repositories::session;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn save_session(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SaveSessionRequest>,
) -> Result<Json<Session>, AppError> {
    if payload.local_id.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError(BookingError::Validation(
            "local_id and email are required".to_string(),
        )));
    }

    let saved = session::save_session(state.store.as_ref(), &payload.local_id, &payload.email).await?;
    Ok(Json(saved))
}

#[axum::debug_handler]
pub async fn get_session(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<GetSessionResponse>, AppError> {
    let current = session::get_session(state.store.as_ref()).await?;
    Ok(Json(GetSessionResponse { session: current }))
}

#[axum::debug_handler]
pub async fn clear_session(State(state): State<Arc<ApiState>>) -> Result<StatusCode, AppError> {
    session::clear_session(state.store.as_ref()).await?;
    Ok(StatusCode::NO_CONTENT)
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use corteya_core::{
    hours::today_summary,
    loyalty::compute_loyalty_state,
    models::{
        barbershop::{Barbershop, BarbershopResponse, SlotsResponse},
        loyalty::LoyaltyResponse,
    },
    slots::{blocking_reservations, day_availability},
};
use corteya_db::repositories::reservation::get_reservations;
use serde::Deserialize;
use tracing::warn;

use super::{load_barbershop, today};
use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters for the slots endpoint
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    /// `YYYY-MM-DD`; defaults to today in the configured time zone
    pub date: Option<NaiveDate>,
}

#[axum::debug_handler]
pub async fn list_barbershops(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Barbershop>>, AppError> {
    let shops = state.directory.list_barbershops().await?;
    Ok(Json(shops))
}

#[axum::debug_handler]
pub async fn get_barbershop(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<BarbershopResponse>, AppError> {
    let barbershop = load_barbershop(&state, &id).await?;
    let summary = today_summary(&barbershop.hours, today(state.settings.timezone));

    Ok(Json(BarbershopResponse {
        barbershop,
        today: summary,
    }))
}

/// Loyalty progress of the local user at one barbershop
///
/// # Endpoint
///
/// ```text
/// GET /api/barbershops/:id/loyalty
/// ```
///
/// `state` is `null` when the barbershop has no applicable program.
#[axum::debug_handler]
pub async fn get_loyalty(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<LoyaltyResponse>, AppError> {
    let barbershop = load_barbershop(&state, &id).await?;
    let config = state.settings.loyalty_policy.config_for(&barbershop);
    let history = get_reservations(state.store.as_ref()).await?;

    let loyalty = compute_loyalty_state(&barbershop.id, config.punches_to_reward, &history);
    if let Some(loyalty) = loyalty.filter(|l| l.is_over_redeemed()) {
        warn!(
            "More rewards redeemed than earned at barbershop {}: used={}, unlocked={}",
            barbershop.id, loyalty.used, loyalty.unlocked
        );
    }

    Ok(Json(LoyaltyResponse {
        barbershop_id: barbershop.id,
        reward_text: config.reward_text,
        state: loyalty,
    }))
}

/// Bookable slots of one barbershop on one date
///
/// # Endpoint
///
/// ```text
/// GET /api/barbershops/:id/slots?date=2025-03-10
/// ```
///
/// A closed day answers `closed: true` with no slots; an open day whose slots
/// are all taken answers `closed: false` with no slots.
#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let barbershop = load_barbershop(&state, &id).await?;
    let date = query.date.unwrap_or_else(|| today(state.settings.timezone));
    let history = get_reservations(state.store.as_ref()).await?;

    let availability = day_availability(
        &barbershop.hours,
        date,
        state.settings.slot_minutes,
        blocking_reservations(&history, &barbershop.id, state.settings.taken_scope),
    );

    Ok(Json(SlotsResponse {
        barbershop_id: barbershop.id,
        date,
        closed: availability.is_closed(),
        slots: availability.into_slots(),
    }))
}

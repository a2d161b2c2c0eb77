use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use corteya_core::{
    booking::{BookingDetails, BookingFlow},
    calendar::{calendar_link, DEFAULT_SERVICE_MINUTES},
    errors::BookingError,
    loyalty::compute_loyalty_state,
    models::reservation::{CreateReservationRequest, CreateReservationResponse, ReservationRecord},
    slots::{blocking_reservations, day_availability},
};
use corteya_db::repositories::reservation::{append_reservation, get_reservations};
use tracing::info;

use super::load_barbershop;
use crate::{middleware::error_handling::AppError, ApiState};

/// Reservation history, most recent first
#[axum::debug_handler]
pub async fn list_reservations(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ReservationRecord>>, AppError> {
    let mut records = get_reservations(state.store.as_ref()).await?;
    records.reverse();
    Ok(Json(records))
}

/// Books a slot and appends it to the local history
///
/// # Endpoint
///
/// ```text
/// POST /api/reservations
/// ```
///
/// The request walks the booking flow: the date's availability is computed
/// from the current history, the time must be one of the free slots, and a
/// reward can only be applied while one is available. Exactly one record is
/// appended on success, and nothing is written when any step fails.
///
/// # Errors
///
/// * `BookingError::NotFound` - Unknown barbershop
/// * `BookingError::Validation` - Unknown service or professional, or a local
///   time skipped by a daylight-saving change
/// * `BookingError::Conflict` - Closed day, taken slot or no reward to redeem
/// * `BookingError::Storage` - Store or directory failure
#[axum::debug_handler]
pub async fn create_reservation(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<CreateReservationResponse>), AppError> {
    let barbershop = load_barbershop(&state, &payload.barber_id).await?;

    let service = match &payload.service_id {
        Some(id) => Some(barbershop.service(id).ok_or_else(|| {
            BookingError::Validation(format!("Service {} is not offered by {}", id, barbershop.name))
        })?),
        None => None,
    };
    let professional = match &payload.professional_id {
        Some(id) => Some(barbershop.professional(id).ok_or_else(|| {
            BookingError::Validation(format!("Professional {} does not work at {}", id, barbershop.name))
        })?),
        None => None,
    };

    // Hold the lock from reading the history until the new one is written
    let _guard = state.booking_lock.lock().await;
    let history = get_reservations(state.store.as_ref()).await?;

    if payload.reward_applied {
        let config = state.settings.loyalty_policy.config_for(&barbershop);
        let can_redeem = compute_loyalty_state(&barbershop.id, config.punches_to_reward, &history)
            .is_some_and(|l| l.can_redeem());
        if !can_redeem {
            return Err(AppError(BookingError::Conflict(format!(
                "No reward available at {}",
                barbershop.name
            ))));
        }
    }

    let availability = day_availability(
        &barbershop.hours,
        payload.date,
        state.settings.slot_minutes,
        blocking_reservations(&history, &barbershop.id, state.settings.taken_scope),
    );

    let details = BookingDetails {
        barber_id: barbershop.id.clone(),
        barber_name: Some(barbershop.name.clone()),
        barber_logo_url: barbershop.logo.clone(),
        service_title: service.map(|s| s.title.clone()),
        service_price: service.and_then(|s| s.price),
        professional_name: professional.map(|p| p.name.clone()),
        pay_method: payload.pay_method,
        reward_applied: payload.reward_applied,
    };

    let reservation = BookingFlow::new()
        .select_date(payload.date, availability)?
        .select_time(&payload.time)?
        .confirm(details)?
        .into_reservation()
        .ok_or_else(|| BookingError::Validation("Booking was not confirmed".to_string()))?;

    // Built before anything is written so a failure leaves the history untouched
    let duration = service
        .and_then(|s| s.duration)
        .unwrap_or(DEFAULT_SERVICE_MINUTES);
    let calendar_url = calendar_link(
        &reservation,
        duration,
        barbershop.address.as_deref(),
        state.settings.timezone,
    )?;

    let record = append_reservation(state.store.as_ref(), reservation).await?;
    drop(_guard);

    info!(
        "Reservation confirmed: id={}, barber_id={}, date={}, time={}, reward_applied={}",
        record.id, record.barber_id, record.date, record.time, record.reward_applied
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateReservationResponse {
            reservation: record,
            calendar_url,
        }),
    ))
}

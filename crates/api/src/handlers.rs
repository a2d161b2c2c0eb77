pub mod barbershop;
pub mod reservation;
pub mod session;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use corteya_core::{errors::BookingError, models::barbershop::Barbershop};

use crate::{middleware::error_handling::AppError, ApiState};

/// Current calendar date in the barbershops' time zone.
pub fn today(timezone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&timezone).date_naive()
}

pub(crate) async fn load_barbershop(state: &ApiState, id: &str) -> Result<Barbershop, AppError> {
    state
        .directory
        .get_barbershop(id)
        .await?
        .ok_or_else(|| AppError(BookingError::NotFound(format!("Barbershop with ID {} not found", id))))
}

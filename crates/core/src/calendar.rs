//! Google Calendar "add event" links for confirmed bookings.

use chrono::{Duration, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::{BookingError, BookingResult};
use crate::hours::TimeOfDay;
use crate::models::reservation::NewReservation;

const CALENDAR_BASE_URL: &str = "https://calendar.google.com/calendar/render";
const CALENDAR_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

pub const DEFAULT_SERVICE_MINUTES: u32 = 30;

/// Builds a prefilled event link for a confirmed booking.
///
/// The booking's date and time are local to `timezone`; the link carries UTC
/// timestamps. Fails for a local time skipped by a daylight-saving jump.
pub fn calendar_link(
    reservation: &NewReservation,
    duration_minutes: u32,
    address: Option<&str>,
    timezone: Tz,
) -> BookingResult<String> {
    let time: TimeOfDay = reservation
        .time
        .parse()
        .map_err(|e| BookingError::Validation(format!("{}", e)))?;
    let naive_time = NaiveTime::from_hms_opt(u32::from(time.hour()), u32::from(time.minute()), 0)
        .ok_or_else(|| BookingError::Validation(format!("Invalid start time {}", reservation.time)))?;

    let start = timezone
        .from_local_datetime(&reservation.date.and_time(naive_time))
        .earliest()
        .ok_or_else(|| {
            BookingError::Validation(format!(
                "{} {} does not exist in {}",
                reservation.date, reservation.time, timezone
            ))
        })?
        .with_timezone(&Utc);
    let end = start + Duration::minutes(i64::from(duration_minutes));

    let text = format!(
        "{} - {} @ {}",
        reservation.service_title.as_deref().unwrap_or_default(),
        reservation.professional_name.as_deref().unwrap_or_default(),
        reservation.barber_name.as_deref().unwrap_or_default(),
    );
    let details = format!(
        "Reserva hecha desde CorteYa. Pago: {}.",
        reservation.pay_method.as_str()
    );

    Ok(format!(
        "{}?action=TEMPLATE&text={}&dates={}/{}&details={}&location={}",
        CALENDAR_BASE_URL,
        urlencoding::encode(&text),
        start.format(CALENDAR_DATE_FORMAT),
        end.format(CALENDAR_DATE_FORMAT),
        urlencoding::encode(&details),
        urlencoding::encode(address.unwrap_or_default()),
    ))
}

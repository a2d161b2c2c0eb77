//! Booking flow: `SelectingDate -> SelectingTime -> Confirming -> Confirmed`.
//!
//! Each transition consumes the flow and returns the next step, so a stale
//! step can never be confirmed twice.

use chrono::NaiveDate;

use crate::errors::{BookingError, BookingResult};
use crate::models::reservation::{NewReservation, PayMethod};
use crate::slots::{DayAvailability, TimeSlot};

/// Everything the confirmation needs besides the chosen date and time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookingDetails {
    pub barber_id: String,
    pub barber_name: Option<String>,
    pub barber_logo_url: Option<String>,
    pub service_title: Option<String>,
    pub service_price: Option<f64>,
    pub professional_name: Option<String>,
    pub pay_method: PayMethod,
    pub reward_applied: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookingFlow {
    SelectingDate,
    SelectingTime {
        date: NaiveDate,
        availability: DayAvailability,
    },
    Confirming {
        date: NaiveDate,
        time: TimeSlot,
        availability: DayAvailability,
    },
    Confirmed {
        reservation: NewReservation,
    },
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingFlow {
    pub fn new() -> Self {
        BookingFlow::SelectingDate
    }

    pub fn step_name(&self) -> &'static str {
        match self {
            BookingFlow::SelectingDate => "selecting_date",
            BookingFlow::SelectingTime { .. } => "selecting_time",
            BookingFlow::Confirming { .. } => "confirming",
            BookingFlow::Confirmed { .. } => "confirmed",
        }
    }

    /// Picks a date. Allowed again before confirming; the chosen time is dropped.
    pub fn select_date(self, date: NaiveDate, availability: DayAvailability) -> BookingResult<Self> {
        match self {
            BookingFlow::Confirmed { .. } => Err(self.invalid("select a date")),
            _ => Ok(BookingFlow::SelectingTime { date, availability }),
        }
    }

    /// Picks one of the slots offered for the selected date.
    pub fn select_time(self, time: &str) -> BookingResult<Self> {
        let (date, availability) = match self {
            BookingFlow::SelectingTime { date, availability }
            | BookingFlow::Confirming {
                date, availability, ..
            } => (date, availability),
            other => return Err(other.invalid("select a time")),
        };

        if availability.is_closed() {
            return Err(BookingError::Conflict(format!(
                "The barbershop is closed on {}",
                date
            )));
        }
        if !availability.slots().iter().any(|s| s == time) {
            return Err(BookingError::Conflict(format!(
                "The slot {} on {} is not available",
                time, date
            )));
        }

        Ok(BookingFlow::Confirming {
            date,
            time: time.to_string(),
            availability,
        })
    }

    /// Confirms the selected slot, producing the one reservation to append.
    pub fn confirm(self, details: BookingDetails) -> BookingResult<Self> {
        let (date, time) = match self {
            BookingFlow::Confirming { date, time, .. } => (date, time),
            other => return Err(other.invalid("confirm")),
        };
        if details.barber_id.is_empty() {
            return Err(BookingError::Validation(
                "A barbershop is required to confirm a booking".to_string(),
            ));
        }

        Ok(BookingFlow::Confirmed {
            reservation: NewReservation {
                barber_id: details.barber_id,
                date,
                time,
                service_title: details.service_title,
                service_price: details.service_price,
                professional_name: details.professional_name,
                barber_name: details.barber_name,
                barber_logo_url: details.barber_logo_url,
                pay_method: details.pay_method,
                reward_applied: details.reward_applied,
            },
        })
    }

    pub fn into_reservation(self) -> Option<NewReservation> {
        match self {
            BookingFlow::Confirmed { reservation } => Some(reservation),
            _ => None,
        }
    }

    /// Starts a new booking attempt.
    pub fn restart(self) -> Self {
        BookingFlow::SelectingDate
    }

    fn invalid(&self, action: &str) -> BookingError {
        BookingError::Validation(format!(
            "Cannot {} while the booking is in step {}",
            action,
            self.step_name()
        ))
    }
}

//! # Slot Availability
//!
//! Bookable start times for a barbershop on one date: every `step_minutes`
//! from opening time, strictly before closing time, minus the times already
//! held by a reservation on that date.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::hours::TimeOfDay;
use crate::models::{barbershop::WeeklyHours, reservation::ReservationRecord};

/// A `HH:mm` start time.
pub type TimeSlot = String;

pub const DEFAULT_SLOT_MINUTES: u32 = 30;

/// Which reservations block a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TakenScope {
    /// Only reservations at the same barbershop.
    #[default]
    Barbershop,
    /// Any reservation on the same date, whichever barbershop it belongs to.
    Global,
}

impl TakenScope {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "barbershop" => Some(Self::Barbershop),
            "global" => Some(Self::Global),
            _ => None,
        }
    }
}

/// Result of looking at one date: closed is not the same as fully booked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayAvailability {
    Closed,
    Open(Vec<TimeSlot>),
}

impl DayAvailability {
    pub fn is_closed(&self) -> bool {
        matches!(self, DayAvailability::Closed)
    }

    pub fn slots(&self) -> &[TimeSlot] {
        match self {
            DayAvailability::Closed => &[],
            DayAvailability::Open(slots) => slots,
        }
    }

    pub fn into_slots(self) -> Vec<TimeSlot> {
        match self {
            DayAvailability::Closed => Vec::new(),
            DayAvailability::Open(slots) => slots,
        }
    }
}

/// Every slot from `open` up to, but excluding, `close`.
///
/// Malformed times, an empty range or a zero step yield no slots.
pub fn generate_slots(open: &str, close: &str, step_minutes: u32) -> Vec<TimeSlot> {
    let (Ok(start), Ok(end)) = (open.parse::<TimeOfDay>(), close.parse::<TimeOfDay>()) else {
        tracing::debug!("Unparseable opening hours: open={:?} close={:?}", open, close);
        return Vec::new();
    };
    if step_minutes == 0 {
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut current = Some(start);
    while let Some(t) = current.filter(|t| *t < end) {
        slots.push(t.to_string());
        current = t.add_minutes(step_minutes);
    }
    slots
}

/// Reservations of `barber_id` (or of anyone, for [`TakenScope::Global`]) that
/// can block a slot.
pub fn blocking_reservations<'a>(
    all_reservations: &'a [ReservationRecord],
    barber_id: &str,
    scope: TakenScope,
) -> Vec<&'a ReservationRecord> {
    all_reservations
        .iter()
        .filter(|r| scope == TakenScope::Global || r.barber_id == barber_id)
        .collect()
}

/// Open/closed state and free slots for `date`.
pub fn day_availability<'a, I>(
    hours: &WeeklyHours,
    date: NaiveDate,
    step_minutes: u32,
    existing_reservations: I,
) -> DayAvailability
where
    I: IntoIterator<Item = &'a ReservationRecord>,
{
    let Some((open, close)) = hours.for_date(date).and_then(|day| day.opening_hours()) else {
        return DayAvailability::Closed;
    };

    let taken: HashSet<&str> = existing_reservations
        .into_iter()
        .filter(|r| r.date == date)
        .map(|r| r.time.as_str())
        .collect();

    let slots = generate_slots(open, close, step_minutes)
        .into_iter()
        .filter(|slot| !taken.contains(slot.as_str()))
        .collect();

    DayAvailability::Open(slots)
}

/// Free slots for `date`; empty on closed days.
pub fn list_available_slots<'a, I>(
    hours: &WeeklyHours,
    date: NaiveDate,
    step_minutes: u32,
    existing_reservations: I,
) -> Vec<TimeSlot>
where
    I: IntoIterator<Item = &'a ReservationRecord>,
{
    day_availability(hours, date, step_minutes, existing_reservations).into_slots()
}

//! Time-of-day parsing and opening-hours display.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::models::barbershop::WeeklyHours;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Minutes since midnight, `00:00` through `24:00` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        let total = hour.checked_mul(60)?.checked_add(minute)?;
        (minute < 60 && total <= MINUTES_PER_DAY).then_some(Self(total))
    }

    pub fn minutes(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    pub fn minute(&self) -> u16 {
        self.0 % 60
    }

    pub fn add_minutes(&self, minutes: u32) -> Option<Self> {
        let total = u32::from(self.0).checked_add(minutes)?;
        (total <= u32::from(MINUTES_PER_DAY)).then(|| Self(total as u16))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTimeError(String);

impl fmt::Display for ParseTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid time of day: {:?}", self.0)
    }
}

impl std::error::Error for ParseTimeError {}

fn parse_component(s: &str) -> Option<u16> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    /// Accepts `HH:mm`, `H:mm` and a bare hour such as `10`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (hour, minute) = match trimmed.split_once(':') {
            Some((h, m)) => (parse_component(h), parse_component(m)),
            None => (parse_component(trimmed), Some(0)),
        };
        hour.zip(minute)
            .and_then(|(h, m)| Self::from_hm(h, m))
            .ok_or_else(|| ParseTimeError(s.to_string()))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// `10:00` becomes `10hs`, anything else is shown as written.
pub fn pretty_hour(hhmm: &str) -> String {
    match hhmm.strip_suffix(":00") {
        Some(hour) => format!("{}hs", hour),
        None => hhmm.to_string(),
    }
}

/// Short label for the opening hours of `date`, e.g. `Hoy: 10hs a 20hs`.
pub fn today_summary(hours: &WeeklyHours, date: NaiveDate) -> String {
    match hours.for_date(date).and_then(|day| day.opening_hours()) {
        Some((open, close)) => format!("Hoy: {} a {}", pretty_hour(open), pretty_hour(close)),
        None => "Hoy: Cerrado".to_string(),
    }
}

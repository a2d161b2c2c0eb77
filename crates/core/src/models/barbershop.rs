use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::loyalty::LoyaltyConfig;
use super::string_or_number;

/// Opening and closing time for one weekday, as stored on the barbershop record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(default)]
    pub open: Option<String>,
    #[serde(default)]
    pub close: Option<String>,
}

impl DaySchedule {
    pub fn new(open: &str, close: &str) -> Self {
        Self {
            open: Some(open.to_string()),
            close: Some(close.to_string()),
        }
    }

    /// Returns the raw open/close pair, or `None` when the shop is closed.
    pub fn opening_hours(&self) -> Option<(&str, &str)> {
        let open = self.open.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let close = self.close.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((open, close))
    }
}

/// Business hours keyed by weekday. A missing day means closed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sun: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mon: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tue: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wed: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thu: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fri: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sat: Option<DaySchedule>,
}

impl WeeklyHours {
    pub fn for_weekday(&self, weekday: Weekday) -> Option<&DaySchedule> {
        match weekday {
            Weekday::Sun => self.sun.as_ref(),
            Weekday::Mon => self.mon.as_ref(),
            Weekday::Tue => self.tue.as_ref(),
            Weekday::Wed => self.wed.as_ref(),
            Weekday::Thu => self.thu.as_ref(),
            Weekday::Fri => self.fri.as_ref(),
            Weekday::Sat => self.sat.as_ref(),
        }
    }

    pub fn for_date(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.for_weekday(date.weekday())
    }

    /// Same schedule for every day of the week.
    pub fn every_day(schedule: DaySchedule) -> Self {
        Self {
            sun: Some(schedule.clone()),
            mon: Some(schedule.clone()),
            tue: Some(schedule.clone()),
            wed: Some(schedule.clone()),
            thu: Some(schedule.clone()),
            fri: Some(schedule.clone()),
            sat: Some(schedule),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub price: Option<f64>,
    /// Minutes.
    #[serde(default)]
    pub duration: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professional {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

/// Barbershop record as served by the remote document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barbershop {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reviews: Option<u32>,
    #[serde(default)]
    pub hours: WeeklyHours,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub professionals: Vec<Professional>,
    #[serde(default)]
    pub loyalty: Option<LoyaltyConfig>,
}

impl Barbershop {
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn professional(&self, id: &str) -> Option<&Professional> {
        self.professionals.iter().find(|p| p.id == id)
    }
}

/// Turns the raw `barbershops` document into a sorted list.
///
/// The document may be an array (with holes) or an object keyed by id. Null
/// entries are dropped, entries without an id get their position as id, and
/// entries that still fail to deserialize are skipped.
pub fn normalize_directory(raw: Value) -> Vec<Barbershop> {
    let entries: Vec<Value> = match raw {
        Value::Array(items) => items,
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        _ => Vec::new(),
    };

    let mut shops: Vec<Barbershop> = entries
        .into_iter()
        .enumerate()
        .filter(|(_, v)| !v.is_null())
        .filter_map(|(index, mut value)| {
            if let Value::Object(map) = &mut value {
                if map.get("id").is_none_or(Value::is_null) {
                    map.insert("id".to_string(), Value::from(index));
                }
            }
            match serde_json::from_value::<Barbershop>(value) {
                Ok(shop) => Some(shop),
                Err(e) => {
                    tracing::warn!("Skipping malformed barbershop entry {}: {}", index, e);
                    None
                }
            }
        })
        .collect();

    shops.sort_by(|a, b| a.name.cmp(&b.name));
    shops
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarbershopResponse {
    pub barbershop: Barbershop,
    pub today: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub barbershop_id: String,
    pub date: NaiveDate,
    /// True when the barbershop does not open on `date`, as opposed to every
    /// slot being taken.
    pub closed: bool,
    pub slots: Vec<String>,
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::string_or_number;

/// How the customer intends to pay at the barbershop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayMethod {
    #[default]
    #[serde(alias = "efectivo")]
    Cash,
    #[serde(alias = "mercado_pago")]
    Mercadopago,
}

impl PayMethod {
    /// Serialized form, as written in the history.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayMethod::Cash => "cash",
            PayMethod::Mercadopago => "mercadopago",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PayMethod::Cash => "Efectivo",
            PayMethod::Mercadopago => "Mercado Pago",
        }
    }
}

/// One booked appointment as stored in the local history blob.
///
/// Records are append-only: `barber_id`, `date`, `time` and `reward_applied`
/// never change after the record is written. Entries written by older
/// clients may lack `id` or `createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    pub barber_id: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default, alias = "service", skip_serializing_if = "Option::is_none")]
    pub service_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_price: Option<f64>,
    #[serde(default, alias = "professional", skip_serializing_if = "Option::is_none")]
    pub professional_name: Option<String>,
    #[serde(default, alias = "barber", skip_serializing_if = "Option::is_none")]
    pub barber_name: Option<String>,
    #[serde(default, alias = "barberLogo", skip_serializing_if = "Option::is_none")]
    pub barber_logo_url: Option<String>,
    #[serde(default)]
    pub pay_method: PayMethod,
    #[serde(default)]
    pub reward_applied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ReservationRecord {
    /// Builds the stored record for a confirmed booking.
    pub fn from_new(id: String, created_at: DateTime<Utc>, new: NewReservation) -> Self {
        Self {
            id,
            barber_id: new.barber_id,
            date: new.date,
            time: new.time,
            service_title: new.service_title,
            service_price: new.service_price,
            professional_name: new.professional_name,
            barber_name: new.barber_name,
            barber_logo_url: new.barber_logo_url,
            pay_method: new.pay_method,
            reward_applied: new.reward_applied,
            created_at: Some(created_at),
        }
    }
}

/// A confirmed booking that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub barber_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub service_title: Option<String>,
    pub service_price: Option<f64>,
    pub professional_name: Option<String>,
    pub barber_name: Option<String>,
    pub barber_logo_url: Option<String>,
    pub pay_method: PayMethod,
    pub reward_applied: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub barber_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub service_id: Option<String>,
    pub professional_id: Option<String>,
    #[serde(default)]
    pub pay_method: PayMethod,
    #[serde(default)]
    pub reward_applied: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationResponse {
    pub reservation: ReservationRecord,
    pub calendar_url: String,
}

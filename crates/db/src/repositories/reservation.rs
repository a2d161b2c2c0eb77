use chrono::Utc;
use corteya_core::models::reservation::{NewReservation, ReservationRecord};
use eyre::{Result, WrapErr};
use serde_json::Value;
use uuid::Uuid;

use crate::store::KeyValueStore;

/// Key of the reservation history document.
pub const RESERVATIONS_KEY: &str = "misReservas";

/// Key under which unreadable history data is kept before it is replaced.
pub const CORRUPT_RESERVATIONS_KEY: &str = "misReservas.corrupt";

enum StoredHistory {
    Missing,
    /// Readable records, plus entries that could not be read as a record.
    Valid {
        records: Vec<ReservationRecord>,
        rejected: Vec<Value>,
    },
    Corrupt(String),
}

async fn read_history(store: &dyn KeyValueStore) -> Result<StoredHistory> {
    let Some(raw) = store.get_item(RESERVATIONS_KEY).await? else {
        return Ok(StoredHistory::Missing);
    };

    let entries = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(Value::Null) => return Ok(StoredHistory::Missing),
        Ok(_) => {
            tracing::warn!("Reservation history is not a list, treating it as empty");
            return Ok(StoredHistory::Corrupt(raw));
        }
        Err(e) => {
            tracing::warn!("Reservation history is unreadable, treating it as empty: {}", e);
            return Ok(StoredHistory::Corrupt(raw));
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<ReservationRecord>(entry.clone()) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Skipping unreadable reservation entry {}: {}", index, e);
                rejected.push(entry);
            }
        }
    }

    Ok(StoredHistory::Valid { records, rejected })
}

/// Full reservation history in creation order.
///
/// Entries that cannot be read are skipped; a document that is not a JSON
/// list reads as an empty history.
pub async fn get_reservations(store: &dyn KeyValueStore) -> Result<Vec<ReservationRecord>> {
    Ok(match read_history(store).await? {
        StoredHistory::Valid { records, .. } => records,
        StoredHistory::Missing | StoredHistory::Corrupt(_) => Vec::new(),
    })
}

/// Appends one record and writes the whole history back.
///
/// Callers that may run concurrently must serialize calls themselves; the
/// store only guarantees that each write replaces the document atomically.
pub async fn append_reservation(
    store: &dyn KeyValueStore,
    reservation: NewReservation,
) -> Result<ReservationRecord> {
    let mut records = match read_history(store).await? {
        StoredHistory::Missing => Vec::new(),
        StoredHistory::Valid { records, rejected } if rejected.is_empty() => records,
        StoredHistory::Valid { records, rejected } => {
            let json = serde_json::to_string(&rejected)
                .wrap_err("Failed to serialize unreadable reservation entries")?;
            back_up(store, &json).await?;
            records
        }
        StoredHistory::Corrupt(raw) => {
            back_up(store, &raw).await?;
            Vec::new()
        }
    };

    let record = ReservationRecord::from_new(Uuid::now_v7().to_string(), Utc::now(), reservation);
    records.push(record.clone());

    let json = serde_json::to_string(&records).wrap_err("Failed to serialize reservation history")?;
    store
        .set_item(RESERVATIONS_KEY, &json)
        .await
        .wrap_err("Failed to write reservation history")?;

    tracing::debug!(
        "Reservation appended: id={}, barber_id={}, date={}, time={}",
        record.id,
        record.barber_id,
        record.date,
        record.time
    );
    Ok(record)
}

async fn back_up(store: &dyn KeyValueStore, raw: &str) -> Result<()> {
    store
        .set_item(CORRUPT_RESERVATIONS_KEY, raw)
        .await
        .wrap_err("Failed to back up unreadable reservation history")
}

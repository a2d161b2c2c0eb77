use corteya_core::models::session::Session;
use eyre::Result;

use crate::store::KeyValueStore;

pub const SESSION_KEY: &str = "session";

pub async fn save_session(store: &dyn KeyValueStore, local_id: &str, email: &str) -> Result<Session> {
    let session = Session {
        local_id: local_id.to_string(),
        email: email.to_string(),
    };
    store
        .set_item(SESSION_KEY, &serde_json::to_string(&session)?)
        .await?;

    Ok(session)
}

/// The remembered session, or `None` when there is none or it cannot be read.
pub async fn get_session(store: &dyn KeyValueStore) -> Result<Option<Session>> {
    let Some(raw) = store.get_item(SESSION_KEY).await? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(session) => Ok(Some(session)),
        Err(e) => {
            tracing::warn!("Stored session is unreadable, ignoring it: {}", e);
            Ok(None)
        }
    }
}

pub async fn clear_session(store: &dyn KeyValueStore) -> Result<()> {
    store.remove_item(SESSION_KEY).await
}

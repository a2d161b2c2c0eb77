use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/session",
        get(handlers::session::get_session)
            .post(handlers::session::save_session)
            .delete(handlers::session::clear_session),
    )
}

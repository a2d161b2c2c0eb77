use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/reservations",
        get(handlers::reservation::list_reservations)
            .post(handlers::reservation::create_reservation),
    )
}

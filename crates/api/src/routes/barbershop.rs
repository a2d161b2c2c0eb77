use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/barbershops", get(handlers::barbershop::list_barbershops))
        .route("/api/barbershops/:id", get(handlers::barbershop::get_barbershop))
        .route(
            "/api/barbershops/:id/loyalty",
            get(handlers::barbershop::get_loyalty),
        )
        .route(
            "/api/barbershops/:id/slots",
            get(handlers::barbershop::get_slots),
        )
}

//! # CorteYa API
//!
//! The API crate provides the web server for the CorteYa booking service. It
//! exposes the barbershop directory, loyalty progress, bookable slots, the
//! local reservation history and the remembered session.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Load inputs, call into `corteya-core`, persist results
//! - **Middleware**: Error mapping
//! - **Directory**: Read-only access to barbershop records
//! - **Config**: Environment and booking configuration

/// Configuration module for API settings
pub mod config;
/// Barbershop record sources
pub mod directory;
/// Request handlers
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use corteya_db::store::KeyValueStore;
use eyre::{Result, WrapErr};
use tokio::{net::TcpListener, sync::Mutex};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::{config::BookingSettings, directory::BarbershopDirectory};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Local key-value store holding reservations and the session
    pub store: Arc<dyn KeyValueStore>,

    /// Source of barbershop records
    pub directory: Arc<dyn BarbershopDirectory>,

    /// Slot step, taken-slot scope, time zone and loyalty policy
    pub settings: BookingSettings,

    /// Serializes read-then-append-then-write on the reservation history
    pub booking_lock: Mutex<()>,
}

impl ApiState {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        directory: Arc<dyn BarbershopDirectory>,
        settings: BookingSettings,
    ) -> Self {
        Self {
            store,
            directory,
            settings,
            booking_lock: Mutex::new(()),
        }
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Barbershop, loyalty and slot endpoints
        .merge(routes::barbershop::routes())
        // Reservation history endpoints
        .merge(routes::reservation::routes())
        // Session endpoints
        .merge(routes::session::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and store
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and booking settings
/// * `store` - Local key-value store
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn KeyValueStore>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let directory = directory::build_directory(&config.directory)?;
    let settings = config.booking_settings()?;
    info!(
        "Booking settings: slot_minutes={}, taken_scope={:?}, timezone={}",
        settings.slot_minutes, settings.taken_scope, settings.timezone
    );

    let state = Arc::new(ApiState::new(store, directory, settings));
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<axum::http::HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .wrap_err("Invalid API_CORS_ORIGINS value")?;
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request tracing and timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(tower_http::trace::TraceLayer::new_for_http())
            .layer(tower_http::timeout::TimeoutLayer::new(
                std::time::Duration::from_secs(config.request_timeout),
            )),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

use std::sync::Arc;

use async_trait::async_trait;
use axum::{http::StatusCode, response::IntoResponse};
use corteya_api::{
    build_router, config::BookingSettings, directory::BarbershopDirectory,
    middleware::error_handling::AppError,
    ApiState,
};
use corteya_core::{errors::BookingError, models::barbershop::Barbershop};
use corteya_db::{mock::MockKvStore, repositories::reservation::RESERVATIONS_KEY};
use axum_test::TestServer;
use mockall::{mock, predicate::eq};
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::{TestContext, OPEN_DAY};

mock! {
    pub Directory {}

    #[async_trait]
    impl BarbershopDirectory for Directory {
        async fn list_barbershops(&self) -> eyre::Result<Vec<Barbershop>>;

        async fn get_barbershop(&self, id: &str) -> eyre::Result<Option<Barbershop>>;
    }
}

#[rstest]
#[case(BookingError::NotFound("missing".into()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("bad input".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Conflict("slot taken".into()), StatusCode::CONFLICT)]
#[case(BookingError::Storage(eyre::eyre!("disk full")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(BookingError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] status: StatusCode) {
    assert_eq!(AppError(error).status(), status);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response = AppError(BookingError::Conflict("slot taken".to_string())).into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body, json!({ "error": "Conflict: slot taken" }));
}

#[test]
fn test_eyre_report_becomes_storage_error() {
    let error = AppError::from(eyre::eyre!("connection reset"));
    assert!(matches!(error.0, BookingError::Storage(_)));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_log::test(tokio::test)]
async fn test_store_failure_maps_to_500() {
    let mut store = MockKvStore::new();
    store
        .expect_get_item()
        .with(eq(RESERVATIONS_KEY))
        .returning(|_| Err(eyre::eyre!("database is locked")));
    // Nothing may be written when the history cannot be read
    store.expect_set_item().never();

    let server = TestContext::new().with_store(Arc::new(store)).server();

    server
        .get("/api/reservations")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    server
        .post("/api/reservations")
        .json(&json!({ "barber_id": "1", "date": OPEN_DAY, "time": "10:00" }))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_log::test(tokio::test)]
async fn test_directory_failure_maps_to_500() {
    let mut directory = MockDirectory::new();
    directory
        .expect_get_barbershop()
        .with(eq("1"))
        .times(1)
        .returning(|_| Err(eyre::eyre!("directory unreachable")));

    let ctx = TestContext::new();
    let state = Arc::new(ApiState::new(
        ctx.store.clone(),
        Arc::new(directory),
        BookingSettings::default(),
    ));
    let server = TestServer::new(build_router(state)).expect("test server");

    let response = server.get("/api/barbershops/1/slots").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["error"],
        "Storage error: directory unreachable"
    );
}

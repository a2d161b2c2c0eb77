use std::sync::Arc;

use axum::http::StatusCode;
use corteya_core::models::{
    barbershop::{DaySchedule, SlotsResponse},
    reservation::{CreateReservationResponse, PayMethod, ReservationRecord},
};
use corteya_db::{mock::MockKvStore, repositories::reservation::RESERVATIONS_KEY};
use mockall::predicate::{always, eq};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::{TestContext, CLOSED_DAY, OPEN_DAY};

#[test_log::test(tokio::test)]
async fn test_create_reservation_with_service_and_professional() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/reservations")
        .json(&json!({
            "barber_id": "1",
            "date": OPEN_DAY,
            "time": "10:30",
            "service_id": "1",
            "professional_id": "1",
            "pay_method": "mercadopago",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body = response.json::<CreateReservationResponse>();
    let record = &body.reservation;
    assert_eq!(record.barber_id, "1");
    assert_eq!(record.time, "10:30");
    assert_eq!(record.service_title.as_deref(), Some("Corte clásico"));
    assert_eq!(record.service_price, Some(5000.0));
    assert_eq!(record.professional_name.as_deref(), Some("Juan"));
    assert_eq!(record.barber_name.as_deref(), Some("Barbería Centro"));
    assert_eq!(record.pay_method, PayMethod::Mercadopago);
    assert!(!record.reward_applied);
    assert!(!record.id.is_empty());

    // 10:30 in Buenos Aires is 13:30 UTC; the service lasts 45 minutes
    assert!(body.calendar_url.starts_with("https://calendar.google.com/calendar/render?action=TEMPLATE"));
    assert!(body.calendar_url.contains("dates=20250310T133000Z/20250310T141500Z"));
}

#[test_log::test(tokio::test)]
async fn test_list_reservations_most_recent_first() {
    let server = TestContext::new().server();

    for time in ["10:00", "11:00"] {
        server
            .post("/api/reservations")
            .json(&json!({ "barber_id": "1", "date": OPEN_DAY, "time": time }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let times: Vec<String> = server
        .get("/api/reservations")
        .await
        .json::<Vec<ReservationRecord>>()
        .into_iter()
        .map(|r| r.time)
        .collect();

    assert_eq!(times, vec!["11:00", "10:00"]);
}

#[test_log::test(tokio::test)]
async fn test_double_booking_is_rejected() {
    let server = TestContext::new().server();
    let payload = json!({ "barber_id": "1", "date": OPEN_DAY, "time": "11:00" });

    server
        .post("/api/reservations")
        .json(&payload)
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/api/reservations")
        .json(&payload)
        .await
        .assert_status(StatusCode::CONFLICT);

    let history = server.get("/api/reservations").await.json::<Vec<Value>>();
    assert_eq!(history.len(), 1);
}

#[rstest]
#[case::closed_day(json!({ "barber_id": "1", "date": CLOSED_DAY, "time": "10:00" }), StatusCode::CONFLICT)]
#[case::outside_hours(json!({ "barber_id": "1", "date": OPEN_DAY, "time": "12:00" }), StatusCode::CONFLICT)]
#[case::off_grid(json!({ "barber_id": "1", "date": OPEN_DAY, "time": "10:15" }), StatusCode::CONFLICT)]
#[case::unknown_barbershop(json!({ "barber_id": "99", "date": OPEN_DAY, "time": "10:00" }), StatusCode::NOT_FOUND)]
#[case::unknown_service(json!({ "barber_id": "1", "date": OPEN_DAY, "time": "10:00", "service_id": "7" }), StatusCode::BAD_REQUEST)]
#[case::unknown_professional(json!({ "barber_id": "1", "date": OPEN_DAY, "time": "10:00", "professional_id": "7" }), StatusCode::BAD_REQUEST)]
#[tokio::test]
async fn test_rejected_bookings_are_not_stored(#[case] payload: Value, #[case] status: StatusCode) {
    let server = TestContext::new().server();

    server
        .post("/api/reservations")
        .json(&payload)
        .await
        .assert_status(status);

    let history = server.get("/api/reservations").await.json::<Vec<Value>>();
    assert!(history.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_reward_requires_available_unit() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/reservations")
        .json(&json!({
            "barber_id": "1",
            "date": OPEN_DAY,
            "time": "10:00",
            "reward_applied": true,
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["error"],
        "Conflict: No reward available at Barbería Centro"
    );
}

#[test_log::test(tokio::test)]
async fn test_reward_redeemed_after_enough_visits() {
    let server = TestContext::new().server();

    for time in ["10:00", "10:30"] {
        server
            .post("/api/reservations")
            .json(&json!({ "barber_id": "1", "date": OPEN_DAY, "time": time }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let redeem = |time: &'static str| {
        json!({
            "barber_id": "1",
            "date": OPEN_DAY,
            "time": time,
            "reward_applied": true,
        })
    };

    let response = server.post("/api/reservations").json(&redeem("11:00")).await;
    response.assert_status(StatusCode::CREATED);
    assert!(response.json::<CreateReservationResponse>().reservation.reward_applied);

    // The only unit is spent
    server
        .post("/api/reservations")
        .json(&redeem("11:30"))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[test_log::test(tokio::test)]
async fn test_malformed_body_is_rejected() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/reservations")
        .json(&json!({ "barber_id": "1", "date": "tomorrow", "time": "10:00" }))
        .await;

    assert!(response.status_code().is_client_error());
}

#[test_log::test(tokio::test)]
async fn test_skipped_local_time_stores_nothing() {
    let mut ctx = TestContext::new();
    ctx.settings.timezone = chrono_tz::America::New_York;
    ctx.barbershops[0].hours.sun = Some(DaySchedule::new("01:00", "04:00"));
    let server = ctx.server();

    // Clocks jump from 02:00 to 03:00 on this date
    let response = server
        .post("/api/reservations")
        .json(&json!({ "barber_id": "1", "date": "2025-03-09", "time": "02:00" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let history = server.get("/api/reservations").await.json::<Vec<Value>>();
    assert!(history.is_empty());

    let slots = server
        .get("/api/barbershops/1/slots?date=2025-03-09")
        .await
        .json::<SlotsResponse>();
    assert!(slots.slots.contains(&"02:00".to_string()));

    server
        .post("/api/reservations")
        .json(&json!({ "barber_id": "1", "date": "2025-03-09", "time": "03:00" }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[test_log::test(tokio::test)]
async fn test_failed_write_leaves_history_unchanged() {
    let existing = json!([{
        "id": "a",
        "barberId": "1",
        "date": OPEN_DAY,
        "time": "10:00",
        "createdAt": "2025-03-01T12:00:00Z",
    }])
    .to_string();

    let mut store = MockKvStore::new();
    store
        .expect_get_item()
        .with(eq(RESERVATIONS_KEY))
        .returning(move |_| Ok(Some(existing.clone())));
    store
        .expect_set_item()
        .with(eq(RESERVATIONS_KEY), always())
        .times(1)
        .returning(|_, _| Err(eyre::eyre!("disk full")));

    let server = TestContext::new().with_store(Arc::new(store)).server();

    server
        .post("/api/reservations")
        .json(&json!({ "barber_id": "1", "date": OPEN_DAY, "time": "10:30" }))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let times: Vec<String> = server
        .get("/api/reservations")
        .await
        .json::<Vec<ReservationRecord>>()
        .into_iter()
        .map(|r| r.time)
        .collect();
    assert_eq!(times, vec!["10:00"]);
}

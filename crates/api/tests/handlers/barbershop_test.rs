use axum::http::StatusCode;
use corteya_core::models::{
    barbershop::{Barbershop, BarbershopResponse, SlotsResponse},
    loyalty::{LoyaltyConfig, LoyaltyResponse},
};
use corteya_core::slots::TakenScope;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::{centro, TestContext, CLOSED_DAY, OPEN_DAY};

fn booking(barber_id: &str, date: &str, time: &str, reward_applied: bool) -> Value {
    json!({
        "barber_id": barber_id,
        "date": date,
        "time": time,
        "reward_applied": reward_applied,
    })
}

#[test_log::test(tokio::test)]
async fn test_list_barbershops_sorted_by_name() {
    let server = TestContext::new().server();

    let response = server.get("/api/barbershops").await;
    response.assert_status_ok();

    let names: Vec<String> = response
        .json::<Vec<Barbershop>>()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(names, vec!["Alto Estilo", "Barbería Centro"]);
}

#[test_log::test(tokio::test)]
async fn test_get_barbershop_includes_today_summary() {
    let server = TestContext::new().server();

    let response = server.get("/api/barbershops/1").await;
    response.assert_status_ok();

    let body = response.json::<BarbershopResponse>();
    assert_eq!(body.barbershop, centro());
    assert!(body.today.starts_with("Hoy: "), "unexpected summary {}", body.today);
}

#[test_log::test(tokio::test)]
async fn test_get_unknown_barbershop() {
    let server = TestContext::new().server();

    let response = server.get("/api/barbershops/99").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body = response.json::<Value>();
    assert_eq!(body["error"], "Resource not found: Barbershop with ID 99 not found");
}

#[test_log::test(tokio::test)]
async fn test_loyalty_without_history() {
    let server = TestContext::new().server();

    let body = server
        .get("/api/barbershops/1/loyalty")
        .await
        .json::<LoyaltyResponse>();

    assert_eq!(body.reward_text, "20% OFF en tu próximo corte");
    let state = body.state.expect("program applies");
    assert_eq!(state.punches_to_reward, 2);
    assert_eq!(state.paid, 0);
    assert_eq!(state.available, 0);
    assert_eq!(state.remaining, 2);
}

#[test_log::test(tokio::test)]
async fn test_loyalty_counts_only_this_barbershop() {
    let server = TestContext::new().server();

    for (barber, time) in [("1", "10:00"), ("1", "10:30"), ("2", "10:00")] {
        server
            .post("/api/reservations")
            .json(&booking(barber, OPEN_DAY, time, false))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let state = server
        .get("/api/barbershops/1/loyalty")
        .await
        .json::<LoyaltyResponse>()
        .state
        .expect("program applies");

    assert_eq!(state.paid, 2);
    assert_eq!(state.unlocked, 1);
    assert_eq!(state.available, 1);
    assert_eq!(state.current, 2);
    assert_eq!(state.remaining, 0);
}

#[test_log::test(tokio::test)]
async fn test_loyalty_config_on_record_wins() {
    let mut ctx = TestContext::new();
    ctx.barbershops[0].loyalty = Some(LoyaltyConfig::new(5, "Lavado gratis"));
    let server = ctx.server();

    let body = server
        .get("/api/barbershops/1/loyalty")
        .await
        .json::<LoyaltyResponse>();

    assert_eq!(body.reward_text, "Lavado gratis");
    assert_eq!(body.state.map(|s| s.punches_to_reward), Some(5));
}

#[test_log::test(tokio::test)]
async fn test_loyalty_zero_threshold_has_no_state() {
    let mut ctx = TestContext::new();
    ctx.barbershops[0].loyalty = Some(LoyaltyConfig::new(0, "Nada"));
    let server = ctx.server();

    let body = server
        .get("/api/barbershops/1/loyalty")
        .await
        .json::<LoyaltyResponse>();

    assert_eq!(body.state, None);
}

#[rstest]
#[case(OPEN_DAY, false, vec!["10:00", "10:30", "11:00", "11:30"])]
#[case(CLOSED_DAY, true, vec![])]
#[tokio::test]
async fn test_get_slots(
    #[case] date: &str,
    #[case] closed: bool,
    #[case] expected: Vec<&str>,
) {
    let server = TestContext::new().server();

    let response = server
        .get(&format!("/api/barbershops/1/slots?date={}", date))
        .await;
    response.assert_status_ok();

    let body = response.json::<SlotsResponse>();
    assert_eq!(body.barbershop_id, "1");
    assert_eq!(body.closed, closed);
    assert_eq!(body.slots, expected);
}

#[test_log::test(tokio::test)]
async fn test_booked_slot_disappears() {
    let server = TestContext::new().server();

    server
        .post("/api/reservations")
        .json(&booking("1", OPEN_DAY, "10:30", false))
        .await
        .assert_status(StatusCode::CREATED);

    let body = server
        .get(&format!("/api/barbershops/1/slots?date={}", OPEN_DAY))
        .await
        .json::<SlotsResponse>();

    assert_eq!(body.slots, vec!["10:00", "11:00", "11:30"]);
}

#[test_log::test(tokio::test)]
async fn test_other_barbershop_bookings_do_not_block_by_default() {
    let server = TestContext::new().server();

    server
        .post("/api/reservations")
        .json(&booking("1", OPEN_DAY, "10:00", false))
        .await
        .assert_status(StatusCode::CREATED);

    let body = server
        .get(&format!("/api/barbershops/2/slots?date={}", OPEN_DAY))
        .await
        .json::<SlotsResponse>();

    assert_eq!(body.slots, vec!["10:00", "10:30"]);
}

#[test_log::test(tokio::test)]
async fn test_global_scope_blocks_across_barbershops() {
    let mut ctx = TestContext::new();
    ctx.settings.taken_scope = TakenScope::Global;
    let server = ctx.server();

    server
        .post("/api/reservations")
        .json(&booking("1", OPEN_DAY, "10:00", false))
        .await
        .assert_status(StatusCode::CREATED);

    let body = server
        .get(&format!("/api/barbershops/2/slots?date={}", OPEN_DAY))
        .await
        .json::<SlotsResponse>();

    assert_eq!(body.slots, vec!["10:30"]);
}

#[test_log::test(tokio::test)]
async fn test_fully_booked_day_is_open_but_empty() {
    let server = TestContext::new().server();

    for time in ["10:00", "10:30"] {
        server
            .post("/api/reservations")
            .json(&booking("2", OPEN_DAY, time, false))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let body = server
        .get(&format!("/api/barbershops/2/slots?date={}", OPEN_DAY))
        .await
        .json::<SlotsResponse>();

    assert!(!body.closed);
    assert!(body.slots.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_slots_with_invalid_date() {
    let server = TestContext::new().server();

    let response = server.get("/api/barbershops/1/slots?date=10-03-2025").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

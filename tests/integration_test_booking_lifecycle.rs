mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{parse_body, TestApp};
use serde_json::{json, Value};

fn future(days: i64) -> String {
    (Utc::now() + Duration::days(days)).to_rfc3339()
}

struct Scenario {
    artist_token: String,
    client_token: String,
    slot_id: String,
    booking_id: String,
}

/// Slot created and booked, booking still Pending.
async fn booked_scenario(app: &TestApp, tag: &str) -> Scenario {
    let token = app.register_user(&format!("artist-{tag}@example.com")).await;
    let (artist_token, _) = app.register_artist(&token).await;
    let slot_id = app.create_slot(&artist_token, &future(3), 60).await;

    let client_token = app.register_user(&format!("client-{tag}@example.com")).await;
    let response = app
        .request(
            "POST",
            "/bookings",
            Some(&client_token),
            Some(json!({ "slotId": slot_id, "sizeId": 1, "placementId": 1 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_body(response).await;
    let booking_id = body["booking"]["id"].as_str().unwrap().to_string();

    Scenario {
        artist_token,
        client_token,
        slot_id,
        booking_id,
    }
}

async fn set_price(app: &TestApp, s: &Scenario, price: f64) -> Value {
    let response = app
        .request(
            "PATCH",
            &format!("/bookings/{}/price", s.booking_id),
            Some(&s.artist_token),
            Some(json!({ "price": price })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    parse_body(response).await
}

async fn slot_is_booked(app: &TestApp, slot_id: &str) -> bool {
    app.state
        .slot_repo
        .find_by_id(slot_id)
        .await
        .unwrap()
        .unwrap()
        .is_booked
}

#[tokio::test]
async fn only_the_artist_may_quote() {
    let app = TestApp::new().await;
    let s = booked_scenario(&app, "quote-auth").await;

    let response = app
        .request(
            "PATCH",
            &format!("/bookings/{}/price", s.booking_id),
            Some(&s.client_token),
            Some(json!({ "price": 50.0 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn quote_rejects_non_positive_prices() {
    let app = TestApp::new().await;
    let s = booked_scenario(&app, "quote-validate").await;

    for price in [json!(0.0), json!(-25.0), Value::Null] {
        let response = app
            .request(
                "PATCH",
                &format!("/bookings/{}/price", s.booking_id),
                Some(&s.artist_token),
                Some(json!({ "price": price })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn quote_is_write_once() {
    let app = TestApp::new().await;
    let s = booked_scenario(&app, "quote-once").await;

    let body = set_price(&app, &s, 149.9).await;
    assert_eq!(body["booking"]["details"]["commissionAmount"], 14.99);

    let response = app
        .request(
            "PATCH",
            &format!("/bookings/{}/price", s.booking_id),
            Some(&s.artist_token),
            Some(json!({ "price": 200.0 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // unchanged
    let booking = app
        .state
        .booking_repo
        .find_by_id(&s.booking_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(booking.price, Some(149.9));
    assert_eq!(booking.commission_amount, Some(14.99));
}

#[tokio::test]
async fn decline_releases_the_slot() {
    let app = TestApp::new().await;
    let s = booked_scenario(&app, "decline").await;
    set_price(&app, &s, 80.0).await;

    let response = app
        .request(
            "PATCH",
            &format!("/bookings/{}/status", s.booking_id),
            Some(&s.client_token),
            Some(json!({ "action": "decline" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["booking"]["status"], "Declined");

    assert!(!slot_is_booked(&app, &s.slot_id).await);

    // the freed slot can be booked again by someone else
    let other = app.register_user("second-chance@example.com").await;
    let response = app
        .request(
            "POST",
            "/bookings",
            Some(&other),
            Some(json!({ "slotId": s.slot_id, "sizeId": 2, "placementId": 2 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn quote_response_rejects_unknown_actions() {
    let app = TestApp::new().await;
    let s = booked_scenario(&app, "bad-action").await;
    set_price(&app, &s, 80.0).await;

    for action in [json!("maybe"), json!("CONFIRM"), Value::Null] {
        let response = app
            .request(
                "PATCH",
                &format!("/bookings/{}/status", s.booking_id),
                Some(&s.client_token),
                Some(json!({ "action": action })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn only_the_client_responds_to_a_quote() {
    let app = TestApp::new().await;
    let s = booked_scenario(&app, "respond-auth").await;
    set_price(&app, &s, 80.0).await;

    let response = app
        .request(
            "PATCH",
            &format!("/bookings/{}/status", s.booking_id),
            Some(&s.artist_token),
            Some(json!({ "action": "confirm" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn cancel_from_confirmed_frees_the_slot() {
    let app = TestApp::new().await;
    let s = booked_scenario(&app, "cancel-confirmed").await;
    set_price(&app, &s, 120.0).await;

    let response = app
        .request(
            "PATCH",
            &format!("/bookings/{}/status", s.booking_id),
            Some(&s.client_token),
            Some(json!({ "action": "confirm" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(slot_is_booked(&app, &s.slot_id).await);

    // the artist cancels the confirmed booking
    let response = app
        .request(
            "PATCH",
            &format!("/bookings/{}/cancel", s.booking_id),
            Some(&s.artist_token),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["booking"]["status"], "Cancelled");

    assert!(!slot_is_booked(&app, &s.slot_id).await);
}

#[tokio::test]
async fn cancelling_a_closed_booking_conflicts() {
    let app = TestApp::new().await;
    let s = booked_scenario(&app, "recancel").await;

    let response = app
        .request(
            "PATCH",
            &format!("/bookings/{}/cancel", s.booking_id),
            Some(&s.client_token),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            "PATCH",
            &format!("/bookings/{}/cancel", s.booking_id),
            Some(&s.client_token),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn outsiders_cannot_cancel() {
    let app = TestApp::new().await;
    let s = booked_scenario(&app, "cancel-auth").await;

    let outsider = app.register_user("bystander@example.com").await;
    let response = app
        .request(
            "PATCH",
            &format!("/bookings/{}/cancel", s.booking_id),
            Some(&outsider),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Deleting a booked slot conflicts until the booking is cancelled, then
/// deletion succeeds.
#[tokio::test]
async fn booked_slots_cannot_be_deleted_until_released() {
    let app = TestApp::new().await;
    let s = booked_scenario(&app, "slot-delete").await;

    let response = app
        .request(
            "DELETE",
            &format!("/appointments/{}", s.slot_id),
            Some(&s.artist_token),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .request(
            "PATCH",
            &format!("/bookings/{}/cancel", s.booking_id),
            Some(&s.client_token),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            "DELETE",
            &format!("/appointments/{}", s.slot_id),
            Some(&s.artist_token),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// The reservation guard is race-proof: with the slot already flagged, a
/// competing create never double-books even when the handler pre-checks
/// are bypassed.
#[tokio::test]
async fn reservation_guard_rejects_a_lost_race() {
    use tatu_backend::domain::models::booking::{Booking, NewBookingParams};

    let app = TestApp::new().await;
    let s = booked_scenario(&app, "race").await;

    let booking = app
        .state
        .booking_repo
        .find_by_id(&s.booking_id)
        .await
        .unwrap()
        .unwrap();

    // Simulates the loser of two concurrent creates: straight to the
    // repository, past every handler check.
    let racer = Booking::new(NewBookingParams {
        user_id: booking.user_id.clone(),
        artist_id: booking.artist_id.clone(),
        slot_id: s.slot_id.clone(),
        size_id: 1,
        placement_id: 1,
        is_color: false,
        reference_url: None,
        comment: None,
    });

    let result = app.state.booking_repo.create_reserving_slot(&racer).await;
    assert!(matches!(
        result,
        Err(tatu_backend::error::AppError::Conflict(_))
    ));

    // still exactly one active booking on the slot
    let active: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM bookings WHERE slot_id = ? AND status_id IN (1, 2, 3)",
    )
    .bind(&s.slot_id)
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(active, 1);
}

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{parse_body, TestApp};
use serde_json::json;

struct Scenario {
    artist_token: String,
    client_token: String,
    booking_id: String,
    slot_id: String,
}

async fn completed_booking(app: &TestApp, tag: &str) -> Scenario {
    let token = app.register_user(&format!("artist-{tag}@example.com")).await;
    let (artist_token, _) = app.register_artist(&token).await;
    let when = (Utc::now() + Duration::days(2)).to_rfc3339();
    let slot_id = app.create_slot(&artist_token, &when, 60).await;

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
        booking_id,
        slot_id,
    }
}

/// Shifts the appointment into the past so the review window is open.
async fn age_appointment(app: &TestApp, slot_id: &str) {
    sqlx::query("UPDATE appointmentslots SET start_time = ? WHERE slot_id = ?")
        .bind(Utc::now() - Duration::days(3))
        .bind(slot_id)
        .execute(&app.pool)
        .await
        .unwrap();
}

#[tokio::test]
async fn reviews_only_after_the_appointment() {
    let app = TestApp::new().await;
    let s = completed_booking(&app, "early").await;

    let response = app
        .request(
            "POST",
            "/reviews",
            Some(&s.client_token),
            Some(json!({ "bookingId": s.booking_id, "rating": 5 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    age_appointment(&app, &s.slot_id).await;

    let response = app
        .request(
            "POST",
            "/reviews",
            Some(&s.client_token),
            Some(json!({ "bookingId": s.booking_id, "rating": 5, "comment": "flawless linework" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_body(response).await;
    assert_eq!(body["review"]["rating"], 5);
    assert_eq!(body["review"]["comment"], "flawless linework");
}

#[tokio::test]
async fn rating_bounds_are_enforced() {
    let app = TestApp::new().await;
    let s = completed_booking(&app, "bounds").await;
    age_appointment(&app, &s.slot_id).await;

    for rating in [json!(0), json!(6), json!(3.5), serde_json::Value::Null] {
        let response = app
            .request(
                "POST",
                "/reviews",
                Some(&s.client_token),
                Some(json!({ "bookingId": s.booking_id, "rating": rating })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn one_review_per_booking() {
    let app = TestApp::new().await;
    let s = completed_booking(&app, "double").await;
    age_appointment(&app, &s.slot_id).await;

    let response = app
        .request(
            "POST",
            "/reviews",
            Some(&s.client_token),
            Some(json!({ "bookingId": s.booking_id, "rating": 4 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request(
            "POST",
            "/reviews",
            Some(&s.client_token),
            Some(json!({ "bookingId": s.booking_id, "rating": 2 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn only_the_booking_client_may_review() {
    let app = TestApp::new().await;
    let s = completed_booking(&app, "owner").await;
    age_appointment(&app, &s.slot_id).await;

    // the artist cannot review their own work
    let response = app
        .request(
            "POST",
            "/reviews",
            Some(&s.artist_token),
            Some(json!({ "bookingId": s.booking_id, "rating": 5 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let stranger = app.register_user("stranger@example.com").await;
    let response = app
        .request(
            "POST",
            "/reviews",
            Some(&stranger),
            Some(json!({ "bookingId": s.booking_id, "rating": 1 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn review_deletion_is_owner_only() {
    let app = TestApp::new().await;
    let s = completed_booking(&app, "delete").await;
    age_appointment(&app, &s.slot_id).await;

    let response = app
        .request(
            "POST",
            "/reviews",
            Some(&s.client_token),
            Some(json!({ "bookingId": s.booking_id, "rating": 4 })),
        )
        .await;
    let body = parse_body(response).await;
    let review_id = body["review"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "DELETE",
            &format!("/reviews/{}", review_id),
            Some(&s.artist_token),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .request(
            "DELETE",
            &format!("/reviews/{}", review_id),
            Some(&s.client_token),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            "DELETE",
            &format!("/reviews/{}", review_id),
            Some(&s.client_token),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn profile_aggregates_bookings_favorites_and_saved_ar() {
    let app = TestApp::new().await;

    let token = app.register_user("profile-artist@example.com").await;
    let (artist_token, _) = app.register_artist(&token).await;
    let when = (Utc::now() + Duration::days(3)).to_rfc3339();
    let slot_id = app.create_slot(&artist_token, &when, 60).await;

    let tattoo_response = app
        .request(
            "POST",
            "/tattoos",
            Some(&artist_token),
            Some(json!({
                "imageURL": "https://cdn.example.com/rose.png",
                "styleIds": [1]
            })),
        )
        .await;
    let tattoo_id = parse_body(tattoo_response).await["tattoo"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let client = app.register_user("profiled@example.com").await;
    app.request(
        "POST",
        "/bookings",
        Some(&client),
        Some(json!({ "slotId": slot_id, "sizeId": 2, "placementId": 3 })),
    )
    .await;
    app.request(
        "POST",
        "/favorites",
        Some(&client),
        Some(json!({ "tattooId": tattoo_id })),
    )
    .await;
    app.request(
        "POST",
        "/savedars",
        Some(&client),
        Some(json!({ "imageURL": "https://cdn.example.com/ar/me.png" })),
    )
    .await;

    let response = app.request("GET", "/users/me", Some(&client), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    let user = &body["user"];
    assert_eq!(user["email"], "profiled@example.com");
    assert!(user["artistProfile"].is_null());
    assert_eq!(user["bookings"].as_array().unwrap().len(), 1);
    assert_eq!(user["bookings"][0]["details"]["status"], "Pending");
    assert_eq!(user["favorites"].as_array().unwrap().len(), 1);
    assert_eq!(user["savedAR"].as_array().unwrap().len(), 1);

    // the artist's own profile carries the artist link
    let response = app.request("GET", "/users/me", Some(&artist_token), None).await;
    let body = parse_body(response).await;
    assert!(body["user"]["artistProfile"]["artistId"].as_str().is_some());
}

#[tokio::test]
async fn profile_update_validates_and_guards_email() {
    let app = TestApp::new().await;

    app.register_user("taken@example.com").await;
    let token = app.register_user("updating@example.com").await;

    let response = app
        .request(
            "PATCH",
            "/users/me",
            Some(&token),
            Some(json!({ "email": "not-an-email" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "PATCH",
            "/users/me",
            Some(&token),
            Some(json!({ "email": "taken@example.com" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .request(
            "PATCH",
            "/users/me",
            Some(&token),
            Some(json!({ "firstName": "Renamed", "email": "renamed@example.com" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["user"]["firstName"], "Renamed");
    assert_eq!(body["user"]["email"], "renamed@example.com");
}

#[tokio::test]
async fn password_change_takes_effect() {
    let app = TestApp::new().await;
    let token = app.register_user("rotating@example.com").await;

    let response = app
        .request(
            "PATCH",
            "/users/me",
            Some(&token),
            Some(json!({ "password": "brand-new-pass" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/login",
            None,
            Some(json!({ "email": "rotating@example.com", "password": "s3cret-pass" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "POST",
            "/login",
            None,
            Some(json!({ "email": "rotating@example.com", "password": "brand-new-pass" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn account_deletion_cascades_and_frees_slots() {
    let app = TestApp::new().await;

    let token = app.register_user("departing-artist@example.com").await;
    let (artist_token, artist_id) = app.register_artist(&token).await;
    let when = (Utc::now() + Duration::days(3)).to_rfc3339();
    let slot_id = app.create_slot(&artist_token, &when, 60).await;

    let client = app.register_user("departing-client@example.com").await;
    let response = app
        .request(
            "POST",
            "/bookings",
            Some(&client),
            Some(json!({ "slotId": slot_id, "sizeId": 1, "placementId": 1 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // the client leaves: their booking disappears and the slot frees up
    let response = app.request("DELETE", "/users/me", Some(&client), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let slot = app.state.slot_repo.find_by_id(&slot_id).await.unwrap().unwrap();
    assert!(!slot.is_booked);

    let bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE slot_id = ?")
        .bind(&slot_id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(bookings, 0);

    // the artist leaves too: profile and slots are gone
    let response = app
        .request("DELETE", "/users/me", Some(&artist_token), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request("GET", &format!("/artists/{}", artist_id), None, None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // deleted accounts cannot log in
    let response = app
        .request(
            "POST",
            "/login",
            None,
            Some(json!({ "email": "departing-client@example.com", "password": "s3cret-pass" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn catalogs_are_seeded() {
    let app = TestApp::new().await;

    for (uri, key, min_len) in [
        ("/cities", "cities", 10),
        ("/styles", "styles", 8),
        ("/sizes", "sizes", 4),
        ("/placements", "placements", 10),
        ("/booking-statuses", "statuses", 5),
    ] {
        let response = app.request("GET", uri, None, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri} failed");
        let body = parse_body(response).await;
        assert!(
            body[key].as_array().unwrap().len() >= min_len,
            "{uri} returned too few rows"
        );
    }
}

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn directory_lists_artists_with_styles_and_pagination() {
    let app = TestApp::new().await;

    for i in 0..3 {
        let token = app.register_user(&format!("dir-artist-{i}@example.com")).await;
        app.register_artist(&token).await;
    }

    let response = app.request("GET", "/artists?page=1&limit=2", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["artists"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["totalItems"], 3);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["hasNextPage"], true);
    assert!(!body["artists"][0]["styles"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn directory_filters_by_style() {
    let app = TestApp::new().await;

    // helper registers artists with styles [1, 3]
    let token = app.register_user("styled@example.com").await;
    app.register_artist(&token).await;

    let response = app.request("GET", "/artists?styleId=3", None, None).await;
    let body = parse_body(response).await;
    assert_eq!(body["artists"].as_array().unwrap().len(), 1);

    let response = app.request("GET", "/artists?styleId=8", None, None).await;
    let body = parse_body(response).await;
    assert!(body["artists"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn artist_page_collects_profile_slots_tattoos_and_reviews() {
    let app = TestApp::new().await;

    let token = app.register_user("showcase@example.com").await;
    let (artist_token, artist_id) = app.register_artist(&token).await;

    app.request(
        "POST",
        "/tattoos",
        Some(&artist_token),
        Some(json!({
            "tattooName": "Koi",
            "imageURL": "https://cdn.example.com/koi.png",
            "styleIds": [5]
        })),
    )
    .await;

    let when = (Utc::now() + Duration::days(4)).to_rfc3339();
    app.create_slot(&artist_token, &when, 90).await;

    let response = app
        .request("GET", &format!("/artists/{}", artist_id), None, None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    let artist = &body["artist"];
    assert_eq!(artist["artistId"], artist_id.as_str());
    assert_eq!(artist["membershipFee"], 49.99);
    assert_eq!(artist["tattoos"].as_array().unwrap().len(), 1);
    assert_eq!(artist["availableSlots"].as_array().unwrap().len(), 1);
    assert_eq!(artist["reviews"]["total"], 0);
    assert!(artist["reviews"]["average"].is_null());
    assert_eq!(artist["styles"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_artist_is_not_found() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/artists/nope", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_updates_are_owner_only() {
    let app = TestApp::new().await;

    let token = app.register_user("updatable@example.com").await;
    let (artist_token, artist_id) = app.register_artist(&token).await;

    let intruder = app.register_user("profile-intruder@example.com").await;
    let response = app
        .request(
            "PATCH",
            &format!("/artists/{}", artist_id),
            Some(&intruder),
            Some(json!({ "artistDescription": "hijacked" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PATCH",
            &format!("/artists/{}", artist_id),
            Some(&artist_token),
            Some(json!({
                "artistDescription": "Now doing color realism",
                "instagramLink": "https://instagram.com/showcase",
                "styleIds": [2]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["artist"]["description"], "Now doing color realism");
    let styles = body["artist"]["styles"].as_array().unwrap();
    assert_eq!(styles.len(), 1);
    assert_eq!(styles[0]["id"], 2);
}

#[tokio::test]
async fn artist_rating_aggregates_reviews() {
    let app = TestApp::new().await;

    let token = app.register_user("rated@example.com").await;
    let (artist_token, artist_id) = app.register_artist(&token).await;
    let when = (Utc::now() + Duration::days(2)).to_rfc3339();
    let slot_id = app.create_slot(&artist_token, &when, 60).await;

    let client = app.register_user("rater@example.com").await;
    let response = app
        .request(
            "POST",
            "/bookings",
            Some(&client),
            Some(json!({ "slotId": slot_id, "sizeId": 1, "placementId": 1 })),
        )
        .await;
    let body = parse_body(response).await;
    let booking_id = body["booking"]["id"].as_str().unwrap().to_string();

    sqlx::query("UPDATE appointmentslots SET start_time = ? WHERE slot_id = ?")
        .bind(Utc::now() - Duration::days(1))
        .bind(&slot_id)
        .execute(&app.pool)
        .await
        .unwrap();

    let response = app
        .request(
            "POST",
            "/reviews",
            Some(&client),
            Some(json!({ "bookingId": booking_id, "rating": 4 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request("GET", &format!("/artists/{}", artist_id), None, None)
        .await;
    let body = parse_body(response).await;
    assert_eq!(body["artist"]["reviews"]["total"], 1);
    assert_eq!(body["artist"]["reviews"]["average"], 4.0);
}

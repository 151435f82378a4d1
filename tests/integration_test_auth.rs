mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn register_login_round_trip() {
    let app = TestApp::new().await;

    let token = app.register_user("ada@example.com").await;
    assert!(!token.is_empty());

    let response = app
        .request(
            "POST",
            "/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "s3cret-pass" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["isArtist"], false);
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = TestApp::new().await;
    app.register_user("dup@example.com").await;

    let response = app
        .request(
            "POST",
            "/register/user",
            None,
            Some(json!({
                "email": "dup@example.com",
                "password": "another-pass",
                "firstName": "Second",
                "lastName": "Account",
                "birthDate": "1990-01-01"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn registration_requires_a_valid_birth_date() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/register/user",
            None,
            Some(json!({
                "email": "nobirth@example.com",
                "password": "pass",
                "firstName": "No",
                "lastName": "Birthday"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/register/user",
            None,
            Some(json!({
                "email": "badbirth@example.com",
                "password": "pass",
                "firstName": "Bad",
                "lastName": "Birthday",
                "birthDate": "1990-00-00"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.register_user("secure@example.com").await;

    let response = app
        .request(
            "POST",
            "/login",
            None,
            Some(json!({ "email": "secure@example.com", "password": "wrong" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn artist_registration_issues_artist_token() {
    let app = TestApp::new().await;

    let token = app.register_user("artist@example.com").await;
    let (artist_token, artist_id) = app.register_artist(&token).await;
    assert!(!artist_id.is_empty());

    // The fresh token carries the artist role: slot creation is allowed.
    let response = app
        .request(
            "POST",
            "/appointments",
            Some(&artist_token),
            Some(json!({
                "dateTime": (chrono::Utc::now() + chrono::Duration::days(3)).to_rfc3339(),
                "duration": 60
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn second_artist_profile_is_rejected() {
    let app = TestApp::new().await;

    let token = app.register_user("once@example.com").await;
    let (artist_token, _) = app.register_artist(&token).await;

    let response = app
        .request(
            "POST",
            "/register/artist",
            Some(&artist_token),
            Some(json!({
                "artistDescription": "Again",
                "cityId": 1,
                "styleIds": [1]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn checkout_confirmation_creates_artist_when_paid() {
    let app = TestApp::new().await;

    let token = app.register_user("paid@example.com").await;

    let response = app
        .request(
            "POST",
            "/stripe/create-checkout-session",
            None,
            Some(json!({
                "email": "paid@example.com",
                "firstName": "Paid",
                "lastName": "Artist",
                "artistDescription": "Paid-up artist",
                "cityId": 1,
                "styleIds": [1, 2]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert!(body["url"].as_str().unwrap().starts_with("https://"));

    let response = app
        .request(
            "POST",
            "/register/artist/confirm",
            Some(&token),
            Some(json!({ "sessionId": "cs_test_123" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["user"]["isArtist"], true);
    assert!(body["user"]["artistId"].as_str().is_some());
}

#[tokio::test]
async fn checkout_confirmation_rejects_unpaid_session() {
    let app = TestApp::with_payment_status("unpaid").await;

    let token = app.register_user("unpaid@example.com").await;

    let response = app
        .request(
            "POST",
            "/register/artist/confirm",
            Some(&token),
            Some(json!({ "sessionId": "cs_test_123" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/users/me", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/users/me", Some("not-a-real-token"), None)
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

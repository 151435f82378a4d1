use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{
    ConfirmArtistRequest, LoginRequest, RegisterArtistRequest, RegisterUserRequest,
};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::user::{Artist, NewUserParams, User};
use crate::domain::services::auth_service::{hash_password, verify_password};
use crate::domain::services::pricing::MEMBERSHIP_FEE;
use crate::domain::services::scheduling::parse_date;
use crate::error::AppError;
use crate::state::AppState;

pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let raw_birth_date = payload
        .birth_date
        .ok_or(AppError::Validation("Birth date is required".into()))?;
    let birth_date = parse_date(&raw_birth_date)
        .map_err(|_| AppError::Validation("Invalid birth date".into()))?;

    if state
        .user_repo
        .find_by_email(&payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Email already in use".into()));
    }

    let password_hash = hash_password(&payload.password)?;

    let user = User::new(NewUserParams {
        email: payload.email,
        password_hash,
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone_number: payload.phone_number,
        birth_date,
    });

    let created = state.user_repo.create(&user).await?;
    let token = state.auth_service.issue(&created.user_id, None)?;

    info!("User registered: {}", created.user_id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User registered",
            "token": token,
        })),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .user_repo
        .find_by_email(&payload.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    let artist = state.artist_repo.find_by_user_id(&user.user_id).await?;
    let token = state
        .auth_service
        .issue(&user.user_id, artist.as_ref().map(|a| a.artist_id.as_str()))?;

    info!("User logged in: {}", user.user_id);

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "token": token,
        "user": {
            "userId": user.user_id,
            "email": user.email,
            "isArtist": artist.is_some(),
            "firstName": user.first_name,
            "lastName": user.last_name,
        }
    })))
}

pub async fn register_artist(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<RegisterArtistRequest>,
) -> Result<impl IntoResponse, AppError> {
    let description = payload.artist_description.ok_or(AppError::Validation(
        "Missing required fields: artistDescription, cityId, and styleIds".into(),
    ))?;
    let city_id = payload.city_id.ok_or(AppError::Validation(
        "Missing required fields: artistDescription, cityId, and styleIds".into(),
    ))?;
    let style_ids = payload.style_ids.ok_or(AppError::Validation(
        "Missing required fields: artistDescription, cityId, and styleIds".into(),
    ))?;

    if state
        .artist_repo
        .find_by_user_id(&claims.sub)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Artist profile already exists".into()));
    }

    let artist = Artist::new(claims.sub.clone(), Some(city_id), description, MEMBERSHIP_FEE);
    let created = state.artist_repo.create(&artist, &style_ids).await?;

    let token = state
        .auth_service
        .issue(&claims.sub, Some(&created.artist_id))?;

    info!("Artist registered: {}", created.artist_id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Artist registered successfully",
            "token": token,
            "artistId": created.artist_id,
        })),
    ))
}

/// Completes the paid enrolment flow: the checkout session carries the
/// registration payload in its metadata and must be settled before the
/// artist profile is created.
pub async fn confirm_artist(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<ConfirmArtistRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state
        .payment_service
        .retrieve_session(&payload.session_id)
        .await?;

    if session.payment_status != "paid" {
        return Err(AppError::Validation("Payment not completed".into()));
    }

    if state
        .artist_repo
        .find_by_user_id(&claims.sub)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Artist profile already exists".into()));
    }

    let description = session
        .metadata
        .get("artistDescription")
        .cloned()
        .ok_or(AppError::Validation("Checkout session is missing registration data".into()))?;
    let city_id = session
        .metadata
        .get("cityId")
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or(AppError::Validation("Checkout session is missing registration data".into()))?;
    let style_ids: Vec<i64> = session
        .metadata
        .get("styleIds")
        .map(|raw| raw.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default();

    let user = state
        .user_repo
        .find_by_id(&claims.sub)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    let artist = Artist::new(claims.sub.clone(), Some(city_id), description, MEMBERSHIP_FEE);
    let created = state.artist_repo.create(&artist, &style_ids).await?;

    let token = state
        .auth_service
        .issue(&claims.sub, Some(&created.artist_id))?;

    info!("Artist enrolment confirmed: {}", created.artist_id);

    Ok(Json(json!({
        "success": true,
        "message": "Artist registration confirmed successfully",
        "token": token,
        "user": {
            "userId": user.user_id,
            "email": user.email,
            "firstName": user.first_name,
            "lastName": user.last_name,
            "isArtist": true,
            "artistId": created.artist_id,
        }
    })))
}

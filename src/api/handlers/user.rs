use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::UpdateUserRequest;
use crate::api::extractors::auth::AuthUser;
use crate::domain::services::auth_service::hash_password;
use crate::domain::services::scheduling::parse_date;
use crate::error::AppError;
use crate::state::AppState;

pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .user_repo
        .find_by_id(&claims.sub)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    let artist = state.artist_repo.find_by_user_id(&claims.sub).await?;
    let bookings = state.booking_repo.list_for_client(&claims.sub).await?;
    let favorites = state.favorite_repo.list_for_user(&claims.sub).await?;
    let saved_ar = state.saved_ar_repo.list_for_user(&claims.sub).await?;

    let mut formatted_bookings = Vec::with_capacity(bookings.len());
    for row in &bookings {
        let review = row.review_id.as_ref().map(|review_id| {
            json!({
                "reviewId": review_id,
                "rating": row.review_rating,
                "comment": row.review_comment,
                "createdAt": row.review_created_at,
            })
        });
        formatted_bookings.push(json!({
            "bookingId": row.booking_id,
            "artist": {
                "artistId": row.artist_id,
                "firstName": row.artist_first_name,
                "lastName": row.artist_last_name,
                "imageURL": row.artist_image_url,
            },
            "appointment": {
                "slotId": row.slot_id,
                "dateTime": row.start_time,
                "duration": row.duration_min,
            },
            "details": {
                "status": row.status.label(),
                "size": row.size,
                "isColor": row.is_color,
                "placement": row.placement,
                "referenceURL": row.reference_url,
                "comment": row.comment,
                "price": row.price,
            },
            "review": review,
            "createdAt": row.created_at,
        }));
    }

    let mut formatted_favorites = Vec::with_capacity(favorites.len());
    for fav in &favorites {
        let styles = state.tattoo_repo.styles_for(&fav.tattoo_id).await?;
        let styles: Vec<Value> = styles
            .iter()
            .map(|s| json!({ "id": s.style_id, "name": s.style_name }))
            .collect();
        formatted_favorites.push(json!({
            "id": fav.fav_id,
            "tattoo": {
                "id": fav.tattoo_id,
                "name": fav.tattoo_name,
                "imageURL": fav.image_url,
                "artist": {
                    "artistId": fav.artist_id,
                    "firstName": fav.artist_first_name,
                    "lastName": fav.artist_last_name,
                },
                "styles": styles,
            }
        }));
    }

    let formatted_saved: Vec<Value> = saved_ar
        .iter()
        .map(|ar| json!({ "id": ar.saved_id, "imageURL": ar.image_url }))
        .collect();

    Ok(Json(json!({
        "success": true,
        "user": {
            "userId": user.user_id,
            "email": user.email,
            "firstName": user.first_name,
            "lastName": user.last_name,
            "phoneNumber": user.phone_number,
            "birthDate": user.birth_date,
            "artistProfile": artist.map(|a| json!({ "artistId": a.artist_id })),
            "bookings": formatted_bookings,
            "savedAR": formatted_saved,
            "favorites": formatted_favorites,
        }
    })))
}

pub async fn update_me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut user = state
        .user_repo
        .find_by_id(&claims.sub)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    if let Some(email) = payload.email {
        if !is_plausible_email(&email) {
            return Err(AppError::Validation("Invalid email format".into()));
        }
        if state
            .user_repo
            .email_taken_by_other(&email, &claims.sub)
            .await?
        {
            return Err(AppError::Conflict("Email is already in use".into()));
        }
        user.email = email;
    }

    if let Some(first_name) = payload.first_name {
        user.first_name = first_name;
    }
    if let Some(last_name) = payload.last_name {
        user.last_name = last_name;
    }
    if let Some(phone_number) = payload.phone_number {
        user.phone_number = Some(phone_number);
    }
    if let Some(raw_birth_date) = payload.birth_date {
        user.birth_date = parse_date(&raw_birth_date)
            .map_err(|_| AppError::Validation("Invalid birth date".into()))?;
    }
    if let Some(password) = payload.password {
        user.password_hash = hash_password(&password)?;
    }

    let updated = state.user_repo.update(&user).await?;

    info!("User updated: {}", updated.user_id);

    Ok(Json(json!({
        "success": true,
        "message": "User information updated successfully",
        "user": {
            "userId": updated.user_id,
            "email": updated.email,
            "firstName": updated.first_name,
            "lastName": updated.last_name,
            "phoneNumber": updated.phone_number,
            "birthDate": updated.birth_date,
        }
    })))
}

pub async fn delete_me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    state.user_repo.delete_cascade(&claims.sub).await?;

    info!("User account deleted: {}", claims.sub);

    Ok(Json(json!({
        "success": true,
        "message": "Account and all associated data successfully deleted"
    })))
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

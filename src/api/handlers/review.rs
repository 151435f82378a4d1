use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::CreateReviewRequest;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::review::Review;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_review(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking_id = payload
        .booking_id
        .ok_or(AppError::Validation("Booking ID is required".into()))?;

    let rating = match payload.rating {
        Some(r) if r.fract() == 0.0 && (1.0..=5.0).contains(&r) => r as i32,
        _ => {
            return Err(AppError::Validation(
                "Rating is required and must be between 1 and 5".into(),
            ))
        }
    };

    let booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.user_id != claims.sub {
        return Err(AppError::Forbidden(
            "You can only review your own bookings".into(),
        ));
    }

    if state
        .review_repo
        .find_by_booking(&booking_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "You have already reviewed this booking".into(),
        ));
    }

    // The appointment itself must be over before it can be reviewed.
    let slot = state
        .slot_repo
        .find_by_id(&booking.slot_id)
        .await?
        .ok_or(AppError::Internal)?;

    if slot.start_time > Utc::now() {
        return Err(AppError::Validation(
            "You can only review past bookings".into(),
        ));
    }

    let review = Review::new(claims.sub.clone(), booking_id, rating, payload.comment);
    let created = state.review_repo.create(&review).await?;

    let reviewer = state
        .user_repo
        .find_by_id(&claims.sub)
        .await?
        .ok_or(AppError::Internal)?;

    let detail = state
        .booking_repo
        .find_detail(&created.booking_id)
        .await?
        .ok_or(AppError::Internal)?;

    info!("Review created: {}", created.review_id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Review created successfully",
            "review": {
                "id": created.review_id,
                "rating": created.rating,
                "comment": created.comment,
                "createdAt": created.created_at,
                "reviewer": {
                    "firstName": reviewer.first_name,
                    "lastName": reviewer.last_name,
                },
                "artist": {
                    "artistId": detail.artist_id,
                    "firstName": detail.artist_first_name,
                    "lastName": detail.artist_last_name,
                }
            }
        })),
    ))
}

pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(review_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let review = state
        .review_repo
        .find_by_id(&review_id)
        .await?
        .ok_or(AppError::NotFound("Review not found".into()))?;

    if review.user_id != claims.sub {
        return Err(AppError::Forbidden(
            "You can only delete your own reviews".into(),
        ));
    }

    state.review_repo.delete(&review_id).await?;

    info!("Review deleted: {}", review_id);

    Ok(Json(json!({
        "success": true,
        "message": "Review deleted successfully"
    })))
}

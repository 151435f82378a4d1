use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateBookingRequest, QuoteResponseRequest, SetPriceRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::booking::{
    Booking, BookingDetailRow, NewBookingParams, QuoteAction,
};
use crate::domain::services::pricing::commission_for;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let slot_id = payload
        .slot_id
        .ok_or(AppError::Validation("Appointment slot ID is required".into()))?;
    let size_id = payload
        .size_id
        .ok_or(AppError::Validation("Tattoo size is required".into()))?;
    let placement_id = payload
        .placement_id
        .ok_or(AppError::Validation("Tattoo placement is required".into()))?;

    let slot = state
        .slot_repo
        .find_by_id(&slot_id)
        .await?
        .ok_or(AppError::NotFound("Appointment slot not found".into()))?;

    if slot.is_booked {
        return Err(AppError::Conflict(
            "This appointment slot is already booked".into(),
        ));
    }

    let artist = state
        .artist_repo
        .find_by_id(&slot.artist_id)
        .await?
        .ok_or(AppError::Internal)?;

    if artist.user_id == claims.sub {
        return Err(AppError::Validation(
            "You cannot book an appointment with yourself".into(),
        ));
    }

    if slot.start_time <= Utc::now() {
        return Err(AppError::Validation(
            "You can only book future appointment slots".into(),
        ));
    }

    let booking = Booking::new(NewBookingParams {
        user_id: claims.sub.clone(),
        artist_id: slot.artist_id.clone(),
        slot_id: slot.slot_id.clone(),
        size_id,
        placement_id,
        is_color: payload.is_color,
        reference_url: payload.reference_url,
        comment: payload.comment,
    });

    // The repository re-checks the slot under the transaction; a lost race
    // surfaces as Conflict here rather than a double booking.
    let created = state.booking_repo.create_reserving_slot(&booking).await?;

    let detail = state
        .booking_repo
        .find_detail(&created.booking_id)
        .await?
        .ok_or(AppError::Internal)?;

    info!(
        "Booking created: {} for slot {}",
        created.booking_id, slot.slot_id
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Booking created successfully. Awaiting artist confirmation.",
            "booking": format_booking(&detail),
        })),
    ))
}

pub async fn set_price(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(booking_id): Path<String>,
    Json(payload): Json<SetPriceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    let artist = state
        .artist_repo
        .find_by_id(&booking.artist_id)
        .await?
        .ok_or(AppError::Internal)?;

    if artist.user_id != claims.sub {
        return Err(AppError::Forbidden(
            "Only the artist can set the price".into(),
        ));
    }

    let price = match payload.price {
        Some(p) if p.is_finite() && p > 0.0 => p,
        _ => return Err(AppError::Validation("Valid price is required".into())),
    };

    if booking.price.is_some() {
        return Err(AppError::Validation("Price is already set".into()));
    }

    let commission = commission_for(price);
    let updated = state
        .booking_repo
        .set_quote(&booking_id, price, commission)
        .await?;

    let detail = state
        .booking_repo
        .find_detail(&updated.booking_id)
        .await?
        .ok_or(AppError::Internal)?;

    info!("Quote issued for booking {}: {}", booking_id, price);

    Ok(Json(json!({
        "success": true,
        "message": "Price set successfully. Awaiting client confirmation.",
        "booking": format_booking(&detail),
    })))
}

pub async fn respond_to_quote(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(booking_id): Path<String>,
    Json(payload): Json<QuoteResponseRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.user_id != claims.sub {
        return Err(AppError::Forbidden(
            "Only the client can confirm or decline the booking".into(),
        ));
    }

    let action = QuoteAction::parse(payload.action.as_deref().unwrap_or_default())?;

    if booking.price.is_none() {
        return Err(AppError::Validation(
            "Cannot confirm/decline booking without a price set".into(),
        ));
    }

    let updated = match action {
        QuoteAction::Confirm => state.booking_repo.confirm(&booking_id).await?,
        QuoteAction::Decline => {
            state
                .booking_repo
                .decline(&booking_id, &booking.slot_id)
                .await?
        }
    };

    let detail = state
        .booking_repo
        .find_detail(&updated.booking_id)
        .await?
        .ok_or(AppError::Internal)?;

    let message = match action {
        QuoteAction::Confirm => "Booking confirmed successfully",
        QuoteAction::Decline => "Booking declined successfully",
    };

    info!("Booking {}: {}", booking_id, message);

    Ok(Json(json!({
        "success": true,
        "message": message,
        "booking": format_booking(&detail),
    })))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    let artist = state
        .artist_repo
        .find_by_id(&booking.artist_id)
        .await?
        .ok_or(AppError::Internal)?;

    let is_client = booking.user_id == claims.sub;
    let is_artist = artist.user_id == claims.sub;

    if !is_client && !is_artist {
        return Err(AppError::Forbidden(
            "Only the client or artist can cancel the booking".into(),
        ));
    }

    let updated = state
        .booking_repo
        .cancel(&booking_id, &booking.slot_id)
        .await?;

    let detail = state
        .booking_repo
        .find_detail(&updated.booking_id)
        .await?
        .ok_or(AppError::Internal)?;

    info!("Booking cancelled: {}", booking_id);

    Ok(Json(json!({
        "success": true,
        "message": "Booking cancelled successfully",
        "booking": format_booking(&detail),
    })))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let detail = state
        .booking_repo
        .find_detail(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    let is_client = detail.user_id == claims.sub;
    let is_artist = detail.artist_user_id == claims.sub;

    if !is_client && !is_artist {
        return Err(AppError::Forbidden(
            "You are not authorized to view this booking".into(),
        ));
    }

    Ok(Json(json!({
        "success": true,
        "booking": format_booking_full(&detail),
    })))
}

pub async fn artist_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let artist = state
        .artist_repo
        .find_by_user_id(&claims.sub)
        .await?
        .ok_or(AppError::Forbidden(
            "Only artists can access their bookings".into(),
        ))?;

    let bookings = state
        .booking_repo
        .list_for_artist(&artist.artist_id)
        .await?;

    let formatted: Vec<_> = bookings
        .iter()
        .map(|row| {
            json!({
                "bookingId": row.booking_id,
                "createdAt": row.created_at,
                "appointment": {
                    "dateTime": row.start_time,
                    "duration": row.duration_min,
                },
                "client": {
                    "firstName": row.client_first_name,
                    "lastName": row.client_last_name,
                    "email": row.client_email,
                    "phoneNumber": row.client_phone,
                },
                "details": {
                    "size": row.size,
                    "placement": row.placement,
                    "isColor": row.is_color,
                    "referenceURL": row.reference_url,
                    "comment": row.comment,
                    "status": row.status.label(),
                    "price": row.price,
                    "commissionAmount": row.commission_amount,
                }
            })
        })
        .collect();

    Ok(Json(json!({
        "success": true,
        "bookings": formatted
    })))
}

/// Compact projection used by the mutation endpoints.
fn format_booking(detail: &BookingDetailRow) -> Value {
    json!({
        "id": detail.booking_id,
        "createdAt": detail.created_at,
        "status": detail.status.label(),
        "details": {
            "size": detail.size,
            "placement": detail.placement,
            "isColor": detail.is_color,
            "referenceURL": detail.reference_url,
            "comment": detail.comment,
            "price": detail.price,
            "commissionAmount": detail.commission_amount,
        },
        "appointment": {
            "dateTime": detail.start_time,
            "duration": detail.duration_min,
        },
        "artist": {
            "artistId": detail.artist_id,
            "firstName": detail.artist_first_name,
            "lastName": detail.artist_last_name,
            "imageURL": detail.artist_image_url,
        }
    })
}

/// Full projection for `GET /bookings/{id}`, including both parties and the
/// review when one exists.
fn format_booking_full(detail: &BookingDetailRow) -> Value {
    let review = detail.review_id.as_ref().map(|review_id| {
        json!({
            "reviewId": review_id,
            "rating": detail.review_rating,
            "comment": detail.review_comment,
            "createdAt": detail.review_created_at,
            "reviewer": {
                "firstName": detail.reviewer_first_name,
                "lastName": detail.reviewer_last_name,
            }
        })
    });

    json!({
        "bookingId": detail.booking_id,
        "createdAt": detail.created_at,
        "appointment": {
            "dateTime": detail.start_time,
            "duration": detail.duration_min,
        },
        "artist": {
            "artistId": detail.artist_id,
            "firstName": detail.artist_first_name,
            "lastName": detail.artist_last_name,
            "email": detail.artist_email,
            "phoneNumber": detail.artist_phone,
            "city": detail.city_name.as_deref().unwrap_or("Not specified"),
            "country": detail.country_name.as_deref().unwrap_or("Not specified"),
            "streetAddress": detail.artist_street_address,
            "imageURL": detail.artist_image_url,
        },
        "client": {
            "firstName": detail.client_first_name,
            "lastName": detail.client_last_name,
            "email": detail.client_email,
            "phoneNumber": detail.client_phone,
        },
        "details": {
            "status": detail.status.label(),
            "size": detail.size,
            "placement": detail.placement,
            "isColor": detail.is_color,
            "referenceURL": detail.reference_url,
            "comment": detail.comment,
            "price": detail.price,
            "commissionAmount": detail.commission_amount,
        },
        "review": review,
    })
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{AvailableSlotsQuery, CreateSlotRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::slot::AppointmentSlot;
use crate::domain::services::scheduling::{day_bounds, parse_date, parse_date_time};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_slot(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateSlotRequest>,
) -> Result<impl IntoResponse, AppError> {
    let artist = state
        .artist_repo
        .find_by_user_id(&claims.sub)
        .await?
        .ok_or(AppError::Forbidden(
            "Only artists can create appointment slots".into(),
        ))?;

    let raw_start = payload.date_time.ok_or(AppError::Validation(
        "Date/time and duration are required".into(),
    ))?;
    let duration = payload.duration.ok_or(AppError::Validation(
        "Date/time and duration are required".into(),
    ))?;

    if duration <= 0 {
        return Err(AppError::Validation(
            "Duration must be a positive number".into(),
        ));
    }

    let start_time = parse_date_time(&raw_start)?;
    if start_time <= Utc::now() {
        return Err(AppError::Validation(
            "Appointment date must be in the future".into(),
        ));
    }

    let slot = AppointmentSlot::new(artist.artist_id.clone(), start_time, duration);

    if state
        .slot_repo
        .find_overlapping(&artist.artist_id, slot.start_time, slot.end_time)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "This time slot overlaps with an existing appointment".into(),
        ));
    }

    let created = state.slot_repo.create(&slot).await?;
    let user = state
        .user_repo
        .find_by_id(&claims.sub)
        .await?
        .ok_or(AppError::Internal)?;

    info!("Appointment slot created: {}", created.slot_id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Appointment slot created successfully",
            "slot": {
                "id": created.slot_id,
                "dateTime": created.start_time,
                "duration": created.duration_min,
                "isBooked": created.is_booked,
                "artist": {
                    "artistId": artist.artist_id,
                    "firstName": user.first_name,
                    "lastName": user.last_name,
                }
            }
        })),
    ))
}

pub async fn delete_slot(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(slot_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let slot = state
        .slot_repo
        .find_by_id(&slot_id)
        .await?
        .ok_or(AppError::NotFound("Appointment slot not found".into()))?;

    let artist = state.artist_repo.find_by_user_id(&claims.sub).await?;
    if artist.map(|a| a.artist_id) != Some(slot.artist_id.clone()) {
        return Err(AppError::Forbidden(
            "You are not authorized to delete this appointment slot".into(),
        ));
    }

    if slot.is_booked {
        return Err(AppError::Conflict(
            "Cannot delete a booked appointment slot".into(),
        ));
    }

    state.slot_repo.delete(&slot_id).await?;

    info!("Appointment slot deleted: {}", slot_id);

    Ok(Json(json!({
        "success": true,
        "message": "Appointment slot deleted successfully"
    })))
}

pub async fn available_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let artist_id = query.artist_id.ok_or(AppError::Validation(
        "Artist ID and date are required".into(),
    ))?;
    let raw_date = query.date.ok_or(AppError::Validation(
        "Artist ID and date are required".into(),
    ))?;

    let date = parse_date(&raw_date)?;
    let (day_start, day_end) = day_bounds(date);

    let slots = state
        .slot_repo
        .list_available(&artist_id, day_start, day_end)
        .await?;

    let formatted: Vec<_> = slots
        .iter()
        .map(|slot| {
            json!({
                "slotId": slot.slot_id,
                "dateTime": slot.start_time,
                "duration": slot.duration_min,
            })
        })
        .collect();

    Ok(Json(json!({
        "success": true,
        "slots": formatted
    })))
}

pub async fn artist_slots(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let artist = state
        .artist_repo
        .find_by_user_id(&claims.sub)
        .await?
        .ok_or(AppError::Forbidden(
            "Only artists can access their appointment slots".into(),
        ))?;

    let slots = state
        .slot_repo
        .list_future_with_bookings(&artist.artist_id)
        .await?;

    let formatted: Vec<_> = slots
        .iter()
        .map(|row| {
            let booking = row.booking_id.as_ref().map(|booking_id| {
                json!({
                    "bookingId": booking_id,
                    "client": {
                        "firstName": row.client_first_name,
                        "lastName": row.client_last_name,
                    }
                })
            });
            json!({
                "id": row.slot_id,
                "dateTime": row.start_time,
                "duration": row.duration_min,
                "isBooked": row.is_booked,
                "booking": booking,
            })
        })
        .collect();

    Ok(Json(json!({
        "success": true,
        "slots": formatted
    })))
}

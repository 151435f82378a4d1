use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An artist-advertised bookable time window.
///
/// Both interval bounds are stored so overlap tests stay plain SQL
/// comparisons. `is_booked` must always match whether an active booking
/// references the slot; every mutation of the flag happens inside the
/// same transaction as the booking write that justifies it.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AppointmentSlot {
    pub slot_id: String,
    pub artist_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_min: i32,
    pub is_booked: bool,
    pub created_at: DateTime<Utc>,
}

impl AppointmentSlot {
    pub fn new(artist_id: String, start_time: DateTime<Utc>, duration_min: i32) -> Self {
        Self {
            slot_id: Uuid::new_v4().to_string(),
            artist_id,
            start_time,
            end_time: start_time + chrono::Duration::minutes(duration_min as i64),
            duration_min,
            is_booked: false,
            created_at: Utc::now(),
        }
    }
}

/// Future slot of an artist, annotated with its active booking (if any)
/// and the booking client's name. LEFT JOIN projection for the artist
/// calendar view.
#[derive(Debug, FromRow, Clone)]
pub struct ArtistSlotRow {
    pub slot_id: String,
    pub start_time: DateTime<Utc>,
    pub duration_min: i32,
    pub is_booked: bool,
    pub booking_id: Option<String>,
    pub client_first_name: Option<String>,
    pub client_last_name: Option<String>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;

/// Booking lifecycle. Persisted as the numeric `status_id` only at the
/// storage boundary; business logic never compares raw integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
pub enum BookingStatus {
    Requested = 1,
    Quoted = 2,
    Confirmed = 3,
    Declined = 4,
    Cancelled = 5,
}

impl BookingStatus {
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Self::Requested),
            2 => Some(Self::Quoted),
            3 => Some(Self::Confirmed),
            4 => Some(Self::Declined),
            5 => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn id(self) -> i32 {
        self as i32
    }

    /// Human-readable status label, matching the seeded status catalog.
    pub fn label(self) -> &'static str {
        match self {
            Self::Requested => "Pending",
            Self::Quoted => "Quoted",
            Self::Confirmed => "Confirmed",
            Self::Declined => "Declined",
            Self::Cancelled => "Cancelled",
        }
    }

    /// An active booking is one still occupying its slot.
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Declined | Self::Cancelled)
    }

    /// Cancellation is possible until the booking is already closed.
    pub fn can_cancel(self) -> bool {
        self.is_active()
    }
}

/// Client response to a quote, validated at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteAction {
    Confirm,
    Decline,
}

impl QuoteAction {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "confirm" => Ok(Self::Confirm),
            "decline" => Ok(Self::Decline),
            _ => Err(AppError::Validation(
                "Valid action (confirm/decline) is required".into(),
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub booking_id: String,
    pub user_id: String,
    pub artist_id: String,
    pub slot_id: String,
    #[sqlx(rename = "status_id")]
    pub status: BookingStatus,
    pub size_id: i64,
    pub placement_id: i64,
    pub is_color: bool,
    pub reference_url: Option<String>,
    pub comment: Option<String>,
    pub price: Option<f64>,
    pub commission_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub user_id: String,
    pub artist_id: String,
    pub slot_id: String,
    pub size_id: i64,
    pub placement_id: i64,
    pub is_color: bool,
    pub reference_url: Option<String>,
    pub comment: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            booking_id: Uuid::new_v4().to_string(),
            user_id: params.user_id,
            artist_id: params.artist_id,
            slot_id: params.slot_id,
            status: BookingStatus::Requested,
            size_id: params.size_id,
            placement_id: params.placement_id,
            is_color: params.is_color,
            reference_url: params.reference_url,
            comment: params.comment,
            price: None,
            commission_amount: None,
            created_at: Utc::now(),
        }
    }
}

/// Full projection for `GET /bookings/{id}`: booking joined with slot,
/// both parties, catalog labels and the review, in one row.
#[derive(Debug, FromRow, Clone)]
pub struct BookingDetailRow {
    pub booking_id: String,
    pub user_id: String,
    pub artist_id: String,
    pub slot_id: String,
    #[sqlx(rename = "status_id")]
    pub status: BookingStatus,
    pub is_color: bool,
    pub reference_url: Option<String>,
    pub comment: Option<String>,
    pub price: Option<f64>,
    pub commission_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub duration_min: i32,
    pub size: String,
    pub placement: String,
    pub artist_user_id: String,
    pub artist_first_name: String,
    pub artist_last_name: String,
    pub artist_email: String,
    pub artist_phone: Option<String>,
    pub artist_image_url: Option<String>,
    pub artist_street_address: Option<String>,
    pub city_name: Option<String>,
    pub country_name: Option<String>,
    pub client_first_name: String,
    pub client_last_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub review_id: Option<String>,
    pub review_rating: Option<i32>,
    pub review_comment: Option<String>,
    pub review_created_at: Option<DateTime<Utc>>,
    pub reviewer_first_name: Option<String>,
    pub reviewer_last_name: Option<String>,
}

/// Row for the artist's booking list.
#[derive(Debug, FromRow, Clone)]
pub struct ArtistBookingRow {
    pub booking_id: String,
    #[sqlx(rename = "status_id")]
    pub status: BookingStatus,
    pub is_color: bool,
    pub reference_url: Option<String>,
    pub comment: Option<String>,
    pub price: Option<f64>,
    pub commission_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub duration_min: i32,
    pub size: String,
    pub placement: String,
    pub client_first_name: String,
    pub client_last_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
}

/// Row for the client's booking list on the profile page.
#[derive(Debug, FromRow, Clone)]
pub struct ClientBookingRow {
    pub booking_id: String,
    pub artist_id: String,
    pub slot_id: String,
    #[sqlx(rename = "status_id")]
    pub status: BookingStatus,
    pub is_color: bool,
    pub reference_url: Option<String>,
    pub comment: Option<String>,
    pub price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub duration_min: i32,
    pub size: String,
    pub placement: String,
    pub artist_first_name: String,
    pub artist_last_name: String,
    pub artist_image_url: Option<String>,
    pub review_id: Option<String>,
    pub review_rating: Option<i32>,
    pub review_comment: Option<String>,
    pub review_created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ids_round_trip() {
        for id in 1..=5 {
            let status = BookingStatus::from_id(id).unwrap();
            assert_eq!(status.id(), id);
        }
        assert!(BookingStatus::from_id(0).is_none());
        assert!(BookingStatus::from_id(6).is_none());
    }

    #[test]
    fn terminal_states_cannot_cancel() {
        assert!(BookingStatus::Requested.can_cancel());
        assert!(BookingStatus::Quoted.can_cancel());
        assert!(BookingStatus::Confirmed.can_cancel());
        assert!(!BookingStatus::Declined.can_cancel());
        assert!(!BookingStatus::Cancelled.can_cancel());
    }

    #[test]
    fn declined_and_cancelled_release_the_slot() {
        assert!(!BookingStatus::Declined.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
        assert!(BookingStatus::Confirmed.is_active());
    }

    #[test]
    fn quote_action_rejects_unknown_strings() {
        assert_eq!(QuoteAction::parse("confirm").unwrap(), QuoteAction::Confirm);
        assert_eq!(QuoteAction::parse("decline").unwrap(), QuoteAction::Decline);
        assert!(QuoteAction::parse("CONFIRM").is_err());
        assert!(QuoteAction::parse("maybe").is_err());
    }
}

use crate::domain::models::{
    booking::{ArtistBookingRow, Booking, BookingDetailRow, ClientBookingRow},
    catalog::{BookingStatusRow, City, Placement, Size, Style},
    engagement::{Favorite, FavoriteTattooRow, SavedAr},
    review::{Review, ReviewWithAuthorRow},
    slot::{AppointmentSlot, ArtistSlotRow},
    tattoo::{Tattoo, TattooCardRow},
    user::{Artist, ArtistDetailRow, ArtistListRow, ArtistQuery, User},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn email_taken_by_other(&self, email: &str, user_id: &str) -> Result<bool, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
    /// Removes the user and every dependent record (artist profile, styles,
    /// tattoos, slots, bookings, reviews, favorites, saved AR) in one
    /// transaction.
    async fn delete_cascade(&self, user_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ArtistRepository: Send + Sync {
    /// Inserts the artist profile and its style links in one transaction.
    async fn create(&self, artist: &Artist, style_ids: &[i64]) -> Result<Artist, AppError>;
    async fn find_by_id(&self, artist_id: &str) -> Result<Option<Artist>, AppError>;
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Artist>, AppError>;
    async fn find_detail(&self, artist_id: &str) -> Result<Option<ArtistDetailRow>, AppError>;
    /// Filtered directory page plus the total row count for pagination.
    async fn list(&self, query: &ArtistQuery) -> Result<(Vec<ArtistListRow>, i64), AppError>;
    /// Partial profile update; when `style_ids` is given the style links are
    /// replaced in the same transaction.
    async fn update(&self, artist: &Artist, style_ids: Option<&[i64]>) -> Result<Artist, AppError>;
    async fn styles_for(&self, artist_id: &str) -> Result<Vec<Style>, AppError>;
}

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_cities(&self) -> Result<Vec<City>, AppError>;
    async fn list_styles(&self) -> Result<Vec<Style>, AppError>;
    async fn list_sizes(&self) -> Result<Vec<Size>, AppError>;
    async fn list_placements(&self) -> Result<Vec<Placement>, AppError>;
    async fn list_booking_statuses(&self) -> Result<Vec<BookingStatusRow>, AppError>;
}

#[async_trait]
pub trait TattooRepository: Send + Sync {
    /// Inserts the tattoo and its style links in one transaction.
    async fn create(&self, tattoo: &Tattoo, style_ids: &[i64]) -> Result<Tattoo, AppError>;
    async fn find_by_id(&self, tattoo_id: &str) -> Result<Option<Tattoo>, AppError>;
    async fn find_card(&self, tattoo_id: &str) -> Result<Option<TattooCardRow>, AppError>;
    async fn list_by_artist(&self, artist_id: &str) -> Result<Vec<Tattoo>, AppError>;
    async fn update(&self, tattoo: &Tattoo, style_ids: Option<&[i64]>) -> Result<Tattoo, AppError>;
    async fn styles_for(&self, tattoo_id: &str) -> Result<Vec<Style>, AppError>;
}

#[async_trait]
pub trait SlotRepository: Send + Sync {
    async fn create(&self, slot: &AppointmentSlot) -> Result<AppointmentSlot, AppError>;
    async fn find_by_id(&self, slot_id: &str) -> Result<Option<AppointmentSlot>, AppError>;
    /// Any slot of the artist whose [start, end) window intersects the given
    /// one. Symmetric interval test.
    async fn find_overlapping(
        &self,
        artist_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<AppointmentSlot>, AppError>;
    async fn list_available(
        &self,
        artist_id: &str,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
    ) -> Result<Vec<AppointmentSlot>, AppError>;
    async fn list_future_unbooked(&self, artist_id: &str) -> Result<Vec<AppointmentSlot>, AppError>;
    async fn list_future_with_bookings(&self, artist_id: &str) -> Result<Vec<ArtistSlotRow>, AppError>;
    async fn delete(&self, slot_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Atomically reserves the slot and inserts the booking. The slot flip
    /// is guarded (`... WHERE is_booked = FALSE`) so two concurrent creates
    /// against the same slot produce exactly one success and one Conflict.
    async fn create_reserving_slot(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, booking_id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_detail(&self, booking_id: &str) -> Result<Option<BookingDetailRow>, AppError>;
    /// Requested → Quoted. Guarded so price and commission can only ever be
    /// written once; a second quote attempt surfaces as Conflict.
    async fn set_quote(
        &self,
        booking_id: &str,
        price: f64,
        commission: f64,
    ) -> Result<Booking, AppError>;
    /// Quoted → Confirmed. The slot stays reserved.
    async fn confirm(&self, booking_id: &str) -> Result<Booking, AppError>;
    /// Quoted → Declined and the slot released, in one transaction.
    async fn decline(&self, booking_id: &str, slot_id: &str) -> Result<Booking, AppError>;
    /// Requested/Quoted/Confirmed → Cancelled and the slot released, in one
    /// transaction. Conflict when the booking is already closed.
    async fn cancel(&self, booking_id: &str, slot_id: &str) -> Result<Booking, AppError>;
    async fn list_for_artist(&self, artist_id: &str) -> Result<Vec<ArtistBookingRow>, AppError>;
    async fn list_for_client(&self, user_id: &str) -> Result<Vec<ClientBookingRow>, AppError>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: &Review) -> Result<Review, AppError>;
    async fn find_by_id(&self, review_id: &str) -> Result<Option<Review>, AppError>;
    async fn find_by_booking(&self, booking_id: &str) -> Result<Option<Review>, AppError>;
    async fn list_for_artist(&self, artist_id: &str) -> Result<Vec<ReviewWithAuthorRow>, AppError>;
    async fn delete(&self, review_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn create(&self, favorite: &Favorite) -> Result<Favorite, AppError>;
    async fn find_by_id(&self, fav_id: &str) -> Result<Option<Favorite>, AppError>;
    async fn find_by_user_and_tattoo(
        &self,
        user_id: &str,
        tattoo_id: &str,
    ) -> Result<Option<Favorite>, AppError>;
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<FavoriteTattooRow>, AppError>;
    async fn delete(&self, fav_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait SavedArRepository: Send + Sync {
    async fn create(&self, saved: &SavedAr) -> Result<SavedAr, AppError>;
    async fn find_by_id(&self, saved_id: &str) -> Result<Option<SavedAr>, AppError>;
    async fn find_by_user_and_url(
        &self,
        user_id: &str,
        image_url: &str,
    ) -> Result<Option<SavedAr>, AppError>;
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<SavedAr>, AppError>;
    async fn delete(&self, saved_id: &str) -> Result<(), AppError>;
}

pub struct CheckoutSessionParams {
    pub product_name: String,
    pub amount_cents: i64,
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: HashMap<String, String>,
}

pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

pub struct CheckoutSessionStatus {
    pub payment_status: String,
    pub metadata: HashMap<String, String>,
}

/// Payment gateway collaborator (Stripe Checkout in production).
#[async_trait]
pub trait PaymentService: Send + Sync {
    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> Result<CheckoutSession, AppError>;
    async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSessionStatus, AppError>;
}

pub mod postgres_artist_repo;
pub mod postgres_booking_repo;
pub mod postgres_catalog_repo;
pub mod postgres_engagement_repo;
pub mod postgres_review_repo;
pub mod postgres_slot_repo;
pub mod postgres_tattoo_repo;
pub mod postgres_user_repo;
pub mod sqlite_artist_repo;
pub mod sqlite_booking_repo;
pub mod sqlite_catalog_repo;
pub mod sqlite_engagement_repo;
pub mod sqlite_review_repo;
pub mod sqlite_slot_repo;
pub mod sqlite_tattoo_repo;
pub mod sqlite_user_repo;

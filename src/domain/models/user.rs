use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub birth_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

pub struct NewUserParams {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub birth_date: NaiveDate,
}

impl User {
    pub fn new(params: NewUserParams) -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            email: params.email,
            password_hash: params.password_hash,
            first_name: params.first_name,
            last_name: params.last_name,
            phone_number: params.phone_number,
            birth_date: params.birth_date,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Artist {
    pub artist_id: String,
    pub user_id: String,
    pub city_id: Option<i64>,
    pub artist_description: String,
    pub street_address: Option<String>,
    pub instagram_link: Option<String>,
    pub portfolio_link: Option<String>,
    pub image_url: Option<String>,
    pub membership_fee: f64,
    pub created_at: DateTime<Utc>,
}

impl Artist {
    pub fn new(user_id: String, city_id: Option<i64>, description: String, membership_fee: f64) -> Self {
        Self {
            artist_id: Uuid::new_v4().to_string(),
            user_id,
            city_id,
            artist_description: description,
            street_address: None,
            instagram_link: None,
            portfolio_link: None,
            image_url: None,
            membership_fee,
            created_at: Utc::now(),
        }
    }
}

/// Directory row for `GET /artists`: artist joined with its user, city and
/// the average rating across reviewed bookings.
#[derive(Debug, FromRow, Clone)]
pub struct ArtistListRow {
    pub artist_id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub city_id: Option<i64>,
    pub city_name: Option<String>,
    pub country_name: Option<String>,
    pub artist_description: String,
    pub street_address: Option<String>,
    pub instagram_link: Option<String>,
    pub portfolio_link: Option<String>,
    pub image_url: Option<String>,
    pub rating: Option<f64>,
}

#[derive(Debug, FromRow, Clone)]
pub struct ArtistDetailRow {
    pub artist_id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub city_id: Option<i64>,
    pub city_name: Option<String>,
    pub country_name: Option<String>,
    pub artist_description: String,
    pub street_address: Option<String>,
    pub instagram_link: Option<String>,
    pub portfolio_link: Option<String>,
    pub image_url: Option<String>,
    pub membership_fee: f64,
    pub created_at: DateTime<Utc>,
}

pub enum ArtistSort {
    Newest,
    RatingDesc,
    RatingAsc,
}

pub struct ArtistQuery {
    pub city_id: Option<i64>,
    pub style_id: Option<i64>,
    pub search: Option<String>,
    pub sort: ArtistSort,
    pub page: i64,
    pub limit: i64,
}

impl ArtistQuery {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// LIKE pattern for the case-insensitive name search, if any.
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_ref()
            .map(|s| format!("%{}%", s.to_lowercase()))
    }
}

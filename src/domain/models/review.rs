use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Review {
    pub review_id: String,
    pub user_id: String,
    pub booking_id: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(user_id: String, booking_id: String, rating: i32, comment: Option<String>) -> Self {
        Self {
            review_id: Uuid::new_v4().to_string(),
            user_id,
            booking_id,
            rating,
            comment,
            created_at: Utc::now(),
        }
    }
}

/// Review joined with the reviewer's name, for artist pages.
#[derive(Debug, FromRow, Clone)]
pub struct ReviewWithAuthorRow {
    pub review_id: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewer_first_name: String,
    pub reviewer_last_name: String,
}

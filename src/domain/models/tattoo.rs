use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Tattoo {
    pub tattoo_id: String,
    pub artist_id: String,
    pub tattoo_name: Option<String>,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl Tattoo {
    pub fn new(artist_id: String, tattoo_name: Option<String>, image_url: String) -> Self {
        Self {
            tattoo_id: Uuid::new_v4().to_string(),
            artist_id,
            tattoo_name,
            image_url,
            created_at: Utc::now(),
        }
    }
}

/// Tattoo joined with its artist's name, the projection gallery cards use.
#[derive(Debug, FromRow, Clone)]
pub struct TattooCardRow {
    pub tattoo_id: String,
    pub tattoo_name: Option<String>,
    pub image_url: String,
    pub artist_id: String,
    pub artist_first_name: String,
    pub artist_last_name: String,
    pub artist_image_url: Option<String>,
}

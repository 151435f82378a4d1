use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Favorite {
    pub fav_id: String,
    pub user_id: String,
    pub tattoo_id: String,
}

impl Favorite {
    pub fn new(user_id: String, tattoo_id: String) -> Self {
        Self {
            fav_id: Uuid::new_v4().to_string(),
            user_id,
            tattoo_id,
        }
    }
}

/// Favorite joined with its tattoo card, for the profile page.
#[derive(Debug, FromRow, Clone)]
pub struct FavoriteTattooRow {
    pub fav_id: String,
    pub tattoo_id: String,
    pub tattoo_name: Option<String>,
    pub image_url: String,
    pub artist_id: String,
    pub artist_first_name: String,
    pub artist_last_name: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct SavedAr {
    pub saved_id: String,
    pub user_id: String,
    pub image_url: String,
}

impl SavedAr {
    pub fn new(user_id: String, image_url: String) -> Self {
        Self {
            saved_id: Uuid::new_v4().to_string(),
            user_id,
            image_url,
        }
    }
}

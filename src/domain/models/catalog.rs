use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct City {
    pub city_id: i64,
    pub name: String,
    pub country_name: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Style {
    pub style_id: i64,
    pub style_name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Size {
    pub size_id: i64,
    pub size: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Placement {
    pub placement_id: i64,
    pub placement: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct BookingStatusRow {
    pub status_id: i64,
    pub status: String,
}

use serde::Deserialize;

// Wire format is camelCase throughout; internal code stays snake_case.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub birth_date: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterArtistRequest {
    pub artist_description: Option<String>,
    pub city_id: Option<i64>,
    pub style_ids: Option<Vec<i64>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmArtistRequest {
    pub session_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub birth_date: Option<String>,
    pub artist_description: String,
    pub instagram_link: Option<String>,
    pub portfolio_link: Option<String>,
    pub image_url: Option<String>,
    pub street_address: Option<String>,
    pub city_id: i64,
    pub style_ids: Vec<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub birth_date: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArtistRequest {
    pub city_id: Option<i64>,
    pub artist_description: Option<String>,
    pub street_address: Option<String>,
    pub instagram_link: Option<String>,
    pub portfolio_link: Option<String>,
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
    pub style_ids: Option<Vec<i64>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTattooRequest {
    pub tattoo_name: Option<String>,
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
    pub style_ids: Option<Vec<i64>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTattooRequest {
    pub tattoo_name: Option<String>,
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
    pub style_ids: Option<Vec<i64>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlotRequest {
    pub date_time: Option<String>,
    pub duration: Option<i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlotsQuery {
    pub artist_id: Option<String>,
    pub date: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistListQuery {
    pub city_id: Option<i64>,
    pub style_id: Option<i64>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub slot_id: Option<String>,
    pub size_id: Option<i64>,
    pub placement_id: Option<i64>,
    #[serde(default)]
    pub is_color: bool,
    #[serde(rename = "referenceURL")]
    pub reference_url: Option<String>,
    pub comment: Option<String>,
}

#[derive(Deserialize)]
pub struct SetPriceRequest {
    pub price: Option<f64>,
}

#[derive(Deserialize)]
pub struct QuoteResponseRequest {
    pub action: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub booking_id: Option<String>,
    pub rating: Option<f64>,
    pub comment: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFavoriteRequest {
    pub tattoo_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateSavedArRequest {
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
}

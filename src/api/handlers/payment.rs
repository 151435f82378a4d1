use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::CheckoutSessionRequest;
use crate::domain::ports::CheckoutSessionParams;
use crate::domain::services::pricing::MEMBERSHIP_FEE_CENTS;
use crate::error::AppError;
use crate::state::AppState;

/// Starts the artist-membership checkout. The registration payload rides
/// along in the session metadata and is read back at confirmation time.
pub async fn create_checkout_session(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CheckoutSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut metadata = HashMap::new();
    metadata.insert("email".to_string(), payload.email);
    metadata.insert("firstName".to_string(), payload.first_name);
    metadata.insert("lastName".to_string(), payload.last_name);
    metadata.insert("artistDescription".to_string(), payload.artist_description);
    metadata.insert("cityId".to_string(), payload.city_id.to_string());
    metadata.insert(
        "styleIds".to_string(),
        payload
            .style_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(","),
    );
    if let Some(phone) = payload.phone_number {
        metadata.insert("phoneNumber".to_string(), phone);
    }
    if let Some(birth_date) = payload.birth_date {
        metadata.insert("birthDate".to_string(), birth_date);
    }
    if let Some(instagram) = payload.instagram_link {
        metadata.insert("instagramLink".to_string(), instagram);
    }
    if let Some(portfolio) = payload.portfolio_link {
        metadata.insert("portfolioLink".to_string(), portfolio);
    }
    if let Some(image_url) = payload.image_url {
        metadata.insert("imageURL".to_string(), image_url);
    }
    if let Some(address) = payload.street_address {
        metadata.insert("streetAddress".to_string(), address);
    }

    let session = state
        .payment_service
        .create_checkout_session(&CheckoutSessionParams {
            product_name: "TATU Artist Membership".to_string(),
            amount_cents: MEMBERSHIP_FEE_CENTS,
            currency: "usd".to_string(),
            success_url: state.config.checkout_success_url.clone(),
            cancel_url: state.config.checkout_cancel_url.clone(),
            metadata,
        })
        .await?;

    info!("Checkout session created: {}", session.id);

    Ok(Json(json!({
        "success": true,
        "url": session.url,
    })))
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateTattooRequest, UpdateTattooRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::tattoo::{Tattoo, TattooCardRow};
use crate::domain::models::catalog::Style;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_tattoo(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateTattooRequest>,
) -> Result<impl IntoResponse, AppError> {
    let artist = state
        .artist_repo
        .find_by_user_id(&claims.sub)
        .await?
        .ok_or(AppError::Forbidden("Only artists can create tattoos".into()))?;

    let image_url = payload
        .image_url
        .ok_or(AppError::Validation("Image URL is required".into()))?;

    let style_ids = match payload.style_ids {
        Some(ids) if !ids.is_empty() => ids,
        _ => {
            return Err(AppError::Validation(
                "At least one style must be specified".into(),
            ))
        }
    };

    let tattoo = Tattoo::new(artist.artist_id.clone(), payload.tattoo_name, image_url);
    let created = state.tattoo_repo.create(&tattoo, &style_ids).await?;

    let card = state
        .tattoo_repo
        .find_card(&created.tattoo_id)
        .await?
        .ok_or(AppError::Internal)?;
    let styles = state.tattoo_repo.styles_for(&created.tattoo_id).await?;

    info!("Tattoo created: {}", created.tattoo_id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Tattoo created successfully",
            "tattoo": format_tattoo_card(&card, &styles),
        })),
    ))
}

pub async fn update_tattoo(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(tattoo_id): Path<String>,
    Json(payload): Json<UpdateTattooRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut tattoo = state
        .tattoo_repo
        .find_by_id(&tattoo_id)
        .await?
        .ok_or(AppError::NotFound("Tattoo not found".into()))?;

    let artist = state.artist_repo.find_by_user_id(&claims.sub).await?;
    if artist.map(|a| a.artist_id) != Some(tattoo.artist_id.clone()) {
        return Err(AppError::Forbidden(
            "You are not authorized to update this tattoo".into(),
        ));
    }

    if let Some(tattoo_name) = payload.tattoo_name {
        tattoo.tattoo_name = Some(tattoo_name);
    }
    if let Some(image_url) = payload.image_url {
        tattoo.image_url = image_url;
    }

    if let Some(ref style_ids) = payload.style_ids {
        if style_ids.is_empty() {
            return Err(AppError::Validation(
                "At least one style must be specified".into(),
            ));
        }
    }

    let updated = state
        .tattoo_repo
        .update(&tattoo, payload.style_ids.as_deref())
        .await?;

    let card = state
        .tattoo_repo
        .find_card(&updated.tattoo_id)
        .await?
        .ok_or(AppError::Internal)?;
    let styles = state.tattoo_repo.styles_for(&updated.tattoo_id).await?;

    info!("Tattoo updated: {}", updated.tattoo_id);

    Ok(Json(json!({
        "success": true,
        "message": "Tattoo updated successfully",
        "tattoo": format_tattoo_card(&card, &styles),
    })))
}

fn format_tattoo_card(card: &TattooCardRow, styles: &[Style]) -> Value {
    json!({
        "id": card.tattoo_id,
        "name": card.tattoo_name,
        "imageURL": card.image_url,
        "artist": {
            "artistId": card.artist_id,
            "firstName": card.artist_first_name,
            "lastName": card.artist_last_name,
            "imageURL": card.artist_image_url,
        },
        "styles": styles.iter().map(|s| json!({
            "id": s.style_id,
            "name": s.style_name,
            "description": s.description,
        })).collect::<Vec<_>>(),
    })
}

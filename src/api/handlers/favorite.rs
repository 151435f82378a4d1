use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::CreateFavoriteRequest;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::engagement::Favorite;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_favorite(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateFavoriteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tattoo_id = payload
        .tattoo_id
        .ok_or(AppError::Validation("Tattoo ID is required".into()))?;

    let card = state
        .tattoo_repo
        .find_card(&tattoo_id)
        .await?
        .ok_or(AppError::NotFound("Tattoo not found".into()))?;

    if state
        .favorite_repo
        .find_by_user_and_tattoo(&claims.sub, &tattoo_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Tattoo is already in favorites".into()));
    }

    let favorite = Favorite::new(claims.sub.clone(), tattoo_id.clone());
    let created = state.favorite_repo.create(&favorite).await?;
    let styles = state.tattoo_repo.styles_for(&tattoo_id).await?;

    info!("Favorite added: {}", created.fav_id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Tattoo added to favorites",
            "favorite": {
                "id": created.fav_id,
                "tattoo": {
                    "id": card.tattoo_id,
                    "name": card.tattoo_name,
                    "imageURL": card.image_url,
                    "artist": {
                        "artistId": card.artist_id,
                        "firstName": card.artist_first_name,
                        "lastName": card.artist_last_name,
                    },
                    "styles": styles.iter().map(|s| json!({
                        "id": s.style_id,
                        "name": s.style_name,
                    })).collect::<Vec<_>>(),
                }
            }
        })),
    ))
}

pub async fn delete_favorite(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(fav_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let favorite = state
        .favorite_repo
        .find_by_id(&fav_id)
        .await?
        .ok_or(AppError::NotFound("Favorite not found".into()))?;

    if favorite.user_id != claims.sub {
        return Err(AppError::Forbidden(
            "You are not authorized to remove this favorite".into(),
        ));
    }

    state.favorite_repo.delete(&fav_id).await?;

    info!("Favorite removed: {}", fav_id);

    Ok(Json(json!({
        "success": true,
        "message": "Tattoo removed from favorites"
    })))
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::CreateSavedArRequest;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::engagement::SavedAr;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_saved_ar(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateSavedArRequest>,
) -> Result<impl IntoResponse, AppError> {
    let image_url = payload
        .image_url
        .ok_or(AppError::Validation("Image URL is required".into()))?;

    if state
        .saved_ar_repo
        .find_by_user_and_url(&claims.sub, &image_url)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Image is already saved".into()));
    }

    let saved = SavedAr::new(claims.sub.clone(), image_url);
    let created = state.saved_ar_repo.create(&saved).await?;

    let user = state
        .user_repo
        .find_by_id(&claims.sub)
        .await?
        .ok_or(AppError::Internal)?;

    info!("AR image saved: {}", created.saved_id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "AR image saved successfully",
            "saved": {
                "id": created.saved_id,
                "imageURL": created.image_url,
                "user": {
                    "firstName": user.first_name,
                    "lastName": user.last_name,
                }
            }
        })),
    ))
}

pub async fn delete_saved_ar(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(saved_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let saved = state
        .saved_ar_repo
        .find_by_id(&saved_id)
        .await?
        .ok_or(AppError::NotFound("Saved AR image not found".into()))?;

    if saved.user_id != claims.sub {
        return Err(AppError::Forbidden(
            "You can only delete your own saved AR images".into(),
        ));
    }

    state.saved_ar_repo.delete(&saved_id).await?;

    info!("Saved AR image deleted: {}", saved_id);

    Ok(Json(json!({
        "success": true,
        "message": "Saved AR image deleted successfully"
    })))
}

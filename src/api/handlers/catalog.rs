use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::error::AppError;
use crate::state::AppState;

pub async fn list_cities(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let cities = state.catalog_repo.list_cities().await?;

    let formatted: Vec<_> = cities
        .iter()
        .map(|city| {
            json!({
                "id": city.city_id,
                "name": city.name,
                "country": city.country_name,
            })
        })
        .collect();

    Ok(Json(json!({ "success": true, "cities": formatted })))
}

pub async fn list_styles(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let styles = state.catalog_repo.list_styles().await?;

    let formatted: Vec<_> = styles
        .iter()
        .map(|style| {
            json!({
                "id": style.style_id,
                "name": style.style_name,
                "description": style.description,
            })
        })
        .collect();

    Ok(Json(json!({ "success": true, "styles": formatted })))
}

pub async fn list_sizes(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let sizes = state.catalog_repo.list_sizes().await?;

    let formatted: Vec<_> = sizes
        .iter()
        .map(|size| json!({ "id": size.size_id, "size": size.size }))
        .collect();

    Ok(Json(json!({ "success": true, "sizes": formatted })))
}

pub async fn list_placements(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let placements = state.catalog_repo.list_placements().await?;

    let formatted: Vec<_> = placements
        .iter()
        .map(|p| json!({ "id": p.placement_id, "placement": p.placement }))
        .collect();

    Ok(Json(json!({ "success": true, "placements": formatted })))
}

pub async fn list_booking_statuses(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let statuses = state.catalog_repo.list_booking_statuses().await?;

    let formatted: Vec<_> = statuses
        .iter()
        .map(|s| json!({ "id": s.status_id, "status": s.status }))
        .collect();

    Ok(Json(json!({ "success": true, "statuses": formatted })))
}

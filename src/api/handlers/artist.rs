use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{ArtistListQuery, UpdateArtistRequest};
use crate::api::dtos::responses::Pagination;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::user::{ArtistQuery, ArtistSort};
use crate::error::AppError;
use crate::state::AppState;

const MAX_PAGE_SIZE: i64 = 50;

pub async fn list_artists(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ArtistListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, MAX_PAGE_SIZE);

    let sort = match query.sort_by.as_deref() {
        Some("ratingDesc") => ArtistSort::RatingDesc,
        Some("ratingAsc") => ArtistSort::RatingAsc,
        _ => ArtistSort::Newest,
    };

    let filter = ArtistQuery {
        city_id: query.city_id,
        style_id: query.style_id,
        search: query.search,
        sort,
        page,
        limit,
    };

    let (rows, total) = state.artist_repo.list(&filter).await?;

    let mut artists = Vec::with_capacity(rows.len());
    for row in &rows {
        let styles = state.artist_repo.styles_for(&row.artist_id).await?;
        let styles: Vec<Value> = styles
            .iter()
            .map(|s| json!({ "id": s.style_id, "name": s.style_name }))
            .collect();
        let city = row.city_id.map(|city_id| {
            json!({
                "id": city_id,
                "name": row.city_name,
                "country": row.country_name,
            })
        });
        artists.push(json!({
            "artistId": row.artist_id,
            "userId": row.user_id,
            "firstName": row.first_name,
            "lastName": row.last_name,
            "email": row.email,
            "city": city,
            "description": row.artist_description,
            "address": row.street_address,
            "social": {
                "instagram": row.instagram_link,
                "portfolio": row.portfolio_link,
            },
            "imageURL": row.image_url,
            "styles": styles,
            "rating": row.rating.unwrap_or(0.0),
        }));
    }

    Ok(Json(json!({
        "success": true,
        "artists": artists,
        "pagination": Pagination::new(page, limit, total),
    })))
}

pub async fn get_artist(
    State(state): State<Arc<AppState>>,
    Path(artist_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let artist = state
        .artist_repo
        .find_detail(&artist_id)
        .await?
        .ok_or(AppError::NotFound("Artist not found".into()))?;

    let styles = state.artist_repo.styles_for(&artist_id).await?;
    let tattoos = state.tattoo_repo.list_by_artist(&artist_id).await?;
    let slots = state.slot_repo.list_future_unbooked(&artist_id).await?;
    let reviews = state.review_repo.list_for_artist(&artist_id).await?;

    let average_rating = if reviews.is_empty() {
        None
    } else {
        Some(reviews.iter().map(|r| r.rating as f64).sum::<f64>() / reviews.len() as f64)
    };

    let mut formatted_tattoos = Vec::with_capacity(tattoos.len());
    for tattoo in &tattoos {
        let tattoo_styles = state.tattoo_repo.styles_for(&tattoo.tattoo_id).await?;
        let tattoo_styles: Vec<Value> = tattoo_styles
            .iter()
            .map(|s| json!({ "id": s.style_id, "name": s.style_name }))
            .collect();
        formatted_tattoos.push(json!({
            "id": tattoo.tattoo_id,
            "name": tattoo.tattoo_name,
            "imageURL": tattoo.image_url,
            "styles": tattoo_styles,
        }));
    }

    let location = artist.city_id.map(|city_id| {
        json!({
            "cityId": city_id,
            "city": artist.city_name,
            "country": artist.country_name,
            "address": artist.street_address,
        })
    });

    Ok(Json(json!({
        "success": true,
        "artist": {
            "artistId": artist.artist_id,
            "user": {
                "userId": artist.user_id,
                "firstName": artist.first_name,
                "lastName": artist.last_name,
                "email": artist.email,
                "phoneNumber": artist.phone_number,
            },
            "location": location,
            "description": artist.artist_description,
            "social": {
                "instagram": artist.instagram_link,
                "portfolio": artist.portfolio_link,
            },
            "imageURL": artist.image_url,
            "membershipFee": artist.membership_fee,
            "createdAt": artist.created_at,
            "styles": styles.iter().map(|s| json!({
                "id": s.style_id,
                "name": s.style_name,
                "description": s.description,
            })).collect::<Vec<_>>(),
            "tattoos": formatted_tattoos,
            "availableSlots": slots.iter().map(|slot| json!({
                "id": slot.slot_id,
                "dateTime": slot.start_time,
                "duration": slot.duration_min,
            })).collect::<Vec<_>>(),
            "reviews": {
                "average": average_rating,
                "total": reviews.len(),
                "items": reviews.iter().map(|r| json!({
                    "id": r.review_id,
                    "rating": r.rating,
                    "comment": r.comment,
                    "createdAt": r.created_at,
                    "reviewer": {
                        "firstName": r.reviewer_first_name,
                        "lastName": r.reviewer_last_name,
                    }
                })).collect::<Vec<_>>(),
            }
        }
    })))
}

pub async fn update_artist(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(artist_id): Path<String>,
    Json(payload): Json<UpdateArtistRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut artist = state
        .artist_repo
        .find_by_id(&artist_id)
        .await?
        .ok_or(AppError::NotFound("Artist not found".into()))?;

    if artist.user_id != claims.sub {
        return Err(AppError::Forbidden(
            "You are not authorized to update this artist profile".into(),
        ));
    }

    if let Some(city_id) = payload.city_id {
        artist.city_id = Some(city_id);
    }
    if let Some(description) = payload.artist_description {
        artist.artist_description = description;
    }
    if let Some(street_address) = payload.street_address {
        artist.street_address = Some(street_address);
    }
    if let Some(instagram_link) = payload.instagram_link {
        artist.instagram_link = Some(instagram_link);
    }
    if let Some(portfolio_link) = payload.portfolio_link {
        artist.portfolio_link = Some(portfolio_link);
    }
    if let Some(image_url) = payload.image_url {
        artist.image_url = Some(image_url);
    }

    let updated = state
        .artist_repo
        .update(&artist, payload.style_ids.as_deref())
        .await?;

    let styles = state.artist_repo.styles_for(&updated.artist_id).await?;

    info!("Artist profile updated: {}", updated.artist_id);

    Ok(Json(json!({
        "success": true,
        "message": "Artist profile updated successfully",
        "artist": {
            "artistId": updated.artist_id,
            "description": updated.artist_description,
            "location": {
                "cityId": updated.city_id,
                "address": updated.street_address,
            },
            "social": {
                "instagram": updated.instagram_link,
                "portfolio": updated.portfolio_link,
            },
            "imageURL": updated.image_url,
            "membershipFee": updated.membership_fee,
            "styles": styles.iter().map(|s| json!({
                "id": s.style_id,
                "name": s.style_name,
                "description": s.description,
            })).collect::<Vec<_>>(),
        }
    })))
}

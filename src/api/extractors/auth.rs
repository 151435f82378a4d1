use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use crate::domain::models::auth::Claims;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::Span;

/// Verified bearer identity: `Authorization: Bearer <jwt>`.
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        let claims = app_state.auth_service.verify(token)?;

        Span::current().record("user_id", &claims.sub);

        Ok(AuthUser(claims))
    }
}

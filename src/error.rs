use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Internal server error")]
    Internal,
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

/// Diagnostic detail is only attached to 500 bodies in development-like
/// configurations.
fn dev_mode() -> bool {
    static DEV: OnceLock<bool> = OnceLock::new();
    *DEV.get_or_init(|| {
        std::env::var("APP_ENV")
            .map(|v| v == "development")
            .unwrap_or(false)
    })
}

fn failure_body(message: &str, detail: Option<String>) -> Json<serde_json::Value> {
    match detail {
        Some(err) if dev_mode() => Json(json!({
            "success": false,
            "message": message,
            "error": err,
        })),
        _ => Json(json!({
            "success": false,
            "message": message,
        })),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => {
                if let Some(db_err) = e.as_database_error() {
                    let code = db_err.code().unwrap_or_default();

                    // 2067 = SQLite unique constraint, 23505 = PostgreSQL unique violation
                    if code == "2067" || code == "23505" {
                        return (
                            StatusCode::CONFLICT,
                            failure_body("Resource already exists (duplicate entry)", None),
                        )
                            .into_response();
                    }

                    // 787 = SQLite foreign key, 23503 = PostgreSQL foreign key violation
                    if code == "787" || code == "23503" {
                        return (
                            StatusCode::BAD_REQUEST,
                            failure_body("Invalid reference to a related resource", None),
                        )
                            .into_response();
                    }
                }

                error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    failure_body("Internal server error", Some(e.to_string())),
                )
                    .into_response()
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, failure_body(msg, None)).into_response()
            }
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, failure_body("Unauthorized", None)).into_response()
            }
            AppError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, failure_body(msg, None)).into_response()
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, failure_body(msg, None)).into_response()
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, failure_body(msg, None)).into_response()
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                failure_body("Internal server error", None),
            )
                .into_response(),
            AppError::InternalWithMsg(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    failure_body("Internal server error", Some(msg.clone())),
                )
                    .into_response()
            }
        }
    }
}

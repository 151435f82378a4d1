use crate::domain::{
    models::catalog::{BookingStatusRow, City, Placement, Size, Style},
    ports::CatalogRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresCatalogRepo {
    pool: PgPool,
}

impl PostgresCatalogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepo {
    async fn list_cities(&self) -> Result<Vec<City>, AppError> {
        sqlx::query_as::<_, City>(
            "SELECT * FROM cities ORDER BY country_name ASC, name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_styles(&self) -> Result<Vec<Style>, AppError> {
        sqlx::query_as::<_, Style>("SELECT * FROM styles ORDER BY style_name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_sizes(&self) -> Result<Vec<Size>, AppError> {
        sqlx::query_as::<_, Size>("SELECT * FROM sizes ORDER BY size_id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_placements(&self) -> Result<Vec<Placement>, AppError> {
        sqlx::query_as::<_, Placement>("SELECT * FROM placements ORDER BY placement_id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_booking_statuses(&self) -> Result<Vec<BookingStatusRow>, AppError> {
        sqlx::query_as::<_, BookingStatusRow>(
            "SELECT * FROM bookingstatuses ORDER BY status_id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}

use crate::domain::{
    models::review::{Review, ReviewWithAuthorRow},
    ports::ReviewRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteReviewRepo {
    pool: SqlitePool,
}

impl SqliteReviewRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for SqliteReviewRepo {
    async fn create(&self, review: &Review) -> Result<Review, AppError> {
        sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (review_id, user_id, booking_id, rating, comment, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&review.review_id)
        .bind(&review.user_id)
        .bind(&review.booking_id)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, review_id: &str) -> Result<Option<Review>, AppError> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE review_id = ?")
            .bind(review_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_booking(&self, booking_id: &str) -> Result<Option<Review>, AppError> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE booking_id = ?")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_for_artist(&self, artist_id: &str) -> Result<Vec<ReviewWithAuthorRow>, AppError> {
        sqlx::query_as::<_, ReviewWithAuthorRow>(
            "SELECT r.review_id, r.rating, r.comment, r.created_at,
                    u.first_name AS reviewer_first_name, u.last_name AS reviewer_last_name
             FROM reviews r
             JOIN bookings b ON b.booking_id = r.booking_id
             JOIN users u ON u.user_id = r.user_id
             WHERE b.artist_id = ?
             ORDER BY r.created_at DESC",
        )
        .bind(artist_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete(&self, review_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reviews WHERE review_id = ?")
            .bind(review_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Review not found".into()));
        }
        Ok(())
    }
}

use crate::domain::{
    models::engagement::{Favorite, FavoriteTattooRow, SavedAr},
    ports::{FavoriteRepository, SavedArRepository},
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresFavoriteRepo {
    pool: PgPool,
}

impl PostgresFavoriteRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for PostgresFavoriteRepo {
    async fn create(&self, favorite: &Favorite) -> Result<Favorite, AppError> {
        sqlx::query_as::<_, Favorite>(
            "INSERT INTO favorites (fav_id, user_id, tattoo_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&favorite.fav_id)
        .bind(&favorite.user_id)
        .bind(&favorite.tattoo_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, fav_id: &str) -> Result<Option<Favorite>, AppError> {
        sqlx::query_as::<_, Favorite>("SELECT * FROM favorites WHERE fav_id = $1")
            .bind(fav_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_user_and_tattoo(
        &self,
        user_id: &str,
        tattoo_id: &str,
    ) -> Result<Option<Favorite>, AppError> {
        sqlx::query_as::<_, Favorite>(
            "SELECT * FROM favorites WHERE user_id = $1 AND tattoo_id = $2",
        )
        .bind(user_id)
        .bind(tattoo_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<FavoriteTattooRow>, AppError> {
        sqlx::query_as::<_, FavoriteTattooRow>(
            "SELECT f.fav_id, f.tattoo_id, t.tattoo_name, t.image_url,
                    t.artist_id, u.first_name AS artist_first_name, u.last_name AS artist_last_name
             FROM favorites f
             JOIN tattoos t ON t.tattoo_id = f.tattoo_id
             JOIN artists a ON a.artist_id = t.artist_id
             JOIN users u ON u.user_id = a.user_id
             WHERE f.user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete(&self, fav_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM favorites WHERE fav_id = $1")
            .bind(fav_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Favorite not found".into()));
        }
        Ok(())
    }
}

pub struct PostgresSavedArRepo {
    pool: PgPool,
}

impl PostgresSavedArRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SavedArRepository for PostgresSavedArRepo {
    async fn create(&self, saved: &SavedAr) -> Result<SavedAr, AppError> {
        sqlx::query_as::<_, SavedAr>(
            "INSERT INTO savedar (saved_id, user_id, image_url) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&saved.saved_id)
        .bind(&saved.user_id)
        .bind(&saved.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, saved_id: &str) -> Result<Option<SavedAr>, AppError> {
        sqlx::query_as::<_, SavedAr>("SELECT * FROM savedar WHERE saved_id = $1")
            .bind(saved_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_user_and_url(
        &self,
        user_id: &str,
        image_url: &str,
    ) -> Result<Option<SavedAr>, AppError> {
        sqlx::query_as::<_, SavedAr>(
            "SELECT * FROM savedar WHERE user_id = $1 AND image_url = $2",
        )
        .bind(user_id)
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<SavedAr>, AppError> {
        sqlx::query_as::<_, SavedAr>("SELECT * FROM savedar WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, saved_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM savedar WHERE saved_id = $1")
            .bind(saved_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Saved AR image not found".into()));
        }
        Ok(())
    }
}

use crate::domain::{
    models::catalog::Style,
    models::tattoo::{Tattoo, TattooCardRow},
    ports::TattooRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresTattooRepo {
    pool: PgPool,
}

impl PostgresTattooRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TattooRepository for PostgresTattooRepo {
    async fn create(&self, tattoo: &Tattoo, style_ids: &[i64]) -> Result<Tattoo, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Tattoo>(
            "INSERT INTO tattoos (tattoo_id, artist_id, tattoo_name, image_url, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(&tattoo.tattoo_id)
        .bind(&tattoo.artist_id)
        .bind(&tattoo.tattoo_name)
        .bind(&tattoo.image_url)
        .bind(tattoo.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        for style_id in style_ids {
            sqlx::query("INSERT INTO tattoostyles (tattoo_id, style_id) VALUES ($1, $2)")
                .bind(&created.tattoo_id)
                .bind(style_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, tattoo_id: &str) -> Result<Option<Tattoo>, AppError> {
        sqlx::query_as::<_, Tattoo>("SELECT * FROM tattoos WHERE tattoo_id = $1")
            .bind(tattoo_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_card(&self, tattoo_id: &str) -> Result<Option<TattooCardRow>, AppError> {
        sqlx::query_as::<_, TattooCardRow>(
            "SELECT t.tattoo_id, t.tattoo_name, t.image_url,
                    t.artist_id, u.first_name AS artist_first_name, u.last_name AS artist_last_name,
                    a.image_url AS artist_image_url
             FROM tattoos t
             JOIN artists a ON a.artist_id = t.artist_id
             JOIN users u ON u.user_id = a.user_id
             WHERE t.tattoo_id = $1",
        )
        .bind(tattoo_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_by_artist(&self, artist_id: &str) -> Result<Vec<Tattoo>, AppError> {
        sqlx::query_as::<_, Tattoo>(
            "SELECT * FROM tattoos WHERE artist_id = $1 ORDER BY created_at DESC",
        )
        .bind(artist_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update(&self, tattoo: &Tattoo, style_ids: Option<&[i64]>) -> Result<Tattoo, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let updated = sqlx::query_as::<_, Tattoo>(
            "UPDATE tattoos SET tattoo_name = $1, image_url = $2 WHERE tattoo_id = $3 RETURNING *",
        )
        .bind(&tattoo.tattoo_name)
        .bind(&tattoo.image_url)
        .bind(&tattoo.tattoo_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        if let Some(style_ids) = style_ids {
            sqlx::query("DELETE FROM tattoostyles WHERE tattoo_id = $1")
                .bind(&updated.tattoo_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            for style_id in style_ids {
                sqlx::query("INSERT INTO tattoostyles (tattoo_id, style_id) VALUES ($1, $2)")
                    .bind(&updated.tattoo_id)
                    .bind(style_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(AppError::Database)?;
            }
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn styles_for(&self, tattoo_id: &str) -> Result<Vec<Style>, AppError> {
        sqlx::query_as::<_, Style>(
            "SELECT s.style_id, s.style_name, s.description
             FROM tattoostyles ts
             JOIN styles s ON s.style_id = ts.style_id
             WHERE ts.tattoo_id = $1
             ORDER BY s.style_id ASC",
        )
        .bind(tattoo_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}

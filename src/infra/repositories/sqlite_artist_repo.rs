use crate::domain::{
    models::catalog::Style,
    models::user::{Artist, ArtistDetailRow, ArtistListRow, ArtistQuery, ArtistSort},
    ports::ArtistRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteArtistRepo {
    pool: SqlitePool,
}

impl SqliteArtistRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArtistRepository for SqliteArtistRepo {
    async fn create(&self, artist: &Artist, style_ids: &[i64]) -> Result<Artist, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Artist>(
            "INSERT INTO artists (artist_id, user_id, city_id, artist_description, street_address, instagram_link, portfolio_link, image_url, membership_fee, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&artist.artist_id)
        .bind(&artist.user_id)
        .bind(artist.city_id)
        .bind(&artist.artist_description)
        .bind(&artist.street_address)
        .bind(&artist.instagram_link)
        .bind(&artist.portfolio_link)
        .bind(&artist.image_url)
        .bind(artist.membership_fee)
        .bind(artist.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        for style_id in style_ids {
            sqlx::query("INSERT INTO artiststyles (artist_id, style_id) VALUES (?, ?)")
                .bind(&created.artist_id)
                .bind(style_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, artist_id: &str) -> Result<Option<Artist>, AppError> {
        sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE artist_id = ?")
            .bind(artist_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Artist>, AppError> {
        sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_detail(&self, artist_id: &str) -> Result<Option<ArtistDetailRow>, AppError> {
        sqlx::query_as::<_, ArtistDetailRow>(
            "SELECT a.artist_id, a.user_id, u.first_name, u.last_name, u.email, u.phone_number,
                    a.city_id, c.name AS city_name, c.country_name,
                    a.artist_description, a.street_address, a.instagram_link, a.portfolio_link,
                    a.image_url, a.membership_fee, a.created_at
             FROM artists a
             JOIN users u ON u.user_id = a.user_id
             LEFT JOIN cities c ON c.city_id = a.city_id
             WHERE a.artist_id = ?",
        )
        .bind(artist_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list(&self, query: &ArtistQuery) -> Result<(Vec<ArtistListRow>, i64), AppError> {
        let filters = "(?1 IS NULL OR a.city_id = ?1)
              AND (?2 IS NULL OR EXISTS (SELECT 1 FROM artiststyles ast WHERE ast.artist_id = a.artist_id AND ast.style_id = ?2))
              AND (?3 IS NULL OR LOWER(u.first_name) LIKE ?3 OR LOWER(u.last_name) LIKE ?3)";

        let order = match query.sort {
            ArtistSort::Newest => "a.created_at DESC",
            ArtistSort::RatingDesc => "rating DESC NULLS LAST",
            ArtistSort::RatingAsc => "rating ASC NULLS LAST",
        };

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM artists a JOIN users u ON u.user_id = a.user_id WHERE {filters}"
        ))
        .bind(query.city_id)
        .bind(query.style_id)
        .bind(query.search_pattern())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let rows = sqlx::query_as::<_, ArtistListRow>(&format!(
            "SELECT a.artist_id, a.user_id, u.first_name, u.last_name, u.email,
                    a.city_id, c.name AS city_name, c.country_name,
                    a.artist_description, a.street_address, a.instagram_link, a.portfolio_link,
                    a.image_url, AVG(r.rating) AS rating
             FROM artists a
             JOIN users u ON u.user_id = a.user_id
             LEFT JOIN cities c ON c.city_id = a.city_id
             LEFT JOIN bookings b ON b.artist_id = a.artist_id
             LEFT JOIN reviews r ON r.booking_id = b.booking_id
             WHERE {filters}
             GROUP BY a.artist_id
             ORDER BY {order}
             LIMIT ?4 OFFSET ?5"
        ))
        .bind(query.city_id)
        .bind(query.style_id)
        .bind(query.search_pattern())
        .bind(query.limit)
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok((rows, total))
    }

    async fn update(&self, artist: &Artist, style_ids: Option<&[i64]>) -> Result<Artist, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let updated = sqlx::query_as::<_, Artist>(
            "UPDATE artists SET city_id = ?, artist_description = ?, street_address = ?, instagram_link = ?, portfolio_link = ?, image_url = ?
             WHERE artist_id = ?
             RETURNING *",
        )
        .bind(artist.city_id)
        .bind(&artist.artist_description)
        .bind(&artist.street_address)
        .bind(&artist.instagram_link)
        .bind(&artist.portfolio_link)
        .bind(&artist.image_url)
        .bind(&artist.artist_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        if let Some(style_ids) = style_ids {
            sqlx::query("DELETE FROM artiststyles WHERE artist_id = ?")
                .bind(&updated.artist_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            for style_id in style_ids {
                sqlx::query("INSERT INTO artiststyles (artist_id, style_id) VALUES (?, ?)")
                    .bind(&updated.artist_id)
                    .bind(style_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(AppError::Database)?;
            }
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn styles_for(&self, artist_id: &str) -> Result<Vec<Style>, AppError> {
        sqlx::query_as::<_, Style>(
            "SELECT s.style_id, s.style_name, s.description
             FROM artiststyles ast
             JOIN styles s ON s.style_id = ast.style_id
             WHERE ast.artist_id = ?
             ORDER BY s.style_id ASC",
        )
        .bind(artist_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}

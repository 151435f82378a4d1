use crate::domain::{models::user::User, ports::UserRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepo {
    async fn create(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (user_id, email, password_hash, first_name, last_name, phone_number, birth_date, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&user.user_id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone_number)
        .bind(user.birth_date)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn email_taken_by_other(&self, email: &str, user_id: &str) -> Result<bool, AppError> {
        let existing = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = ? AND user_id != ?",
        )
        .bind(email)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(existing.is_some())
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET email = ?, password_hash = ?, first_name = ?, last_name = ?, phone_number = ?, birth_date = ?
             WHERE user_id = ?
             RETURNING *",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone_number)
        .bind(user.birth_date)
        .bind(&user.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete_cascade(&self, user_id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let artist_id: Option<String> =
            sqlx::query_scalar("SELECT artist_id FROM artists WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::Database)?;

        if let Some(artist_id) = artist_id {
            sqlx::query("DELETE FROM reviews WHERE booking_id IN (SELECT booking_id FROM bookings WHERE artist_id = ?)")
                .bind(&artist_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            sqlx::query("DELETE FROM bookings WHERE artist_id = ?")
                .bind(&artist_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            sqlx::query("DELETE FROM favorites WHERE tattoo_id IN (SELECT tattoo_id FROM tattoos WHERE artist_id = ?)")
                .bind(&artist_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            sqlx::query("DELETE FROM tattoostyles WHERE tattoo_id IN (SELECT tattoo_id FROM tattoos WHERE artist_id = ?)")
                .bind(&artist_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            sqlx::query("DELETE FROM tattoos WHERE artist_id = ?")
                .bind(&artist_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            sqlx::query("DELETE FROM appointmentslots WHERE artist_id = ?")
                .bind(&artist_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            sqlx::query("DELETE FROM artiststyles WHERE artist_id = ?")
                .bind(&artist_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            sqlx::query("DELETE FROM artists WHERE artist_id = ?")
                .bind(&artist_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        // Slots this user had reserved elsewhere become bookable again.
        sqlx::query(
            "UPDATE appointmentslots SET is_booked = 0 WHERE slot_id IN
             (SELECT slot_id FROM bookings WHERE user_id = ? AND status_id IN (1, 2, 3))",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        sqlx::query("DELETE FROM reviews WHERE booking_id IN (SELECT booking_id FROM bookings WHERE user_id = ?)")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        sqlx::query("DELETE FROM reviews WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        sqlx::query("DELETE FROM bookings WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        sqlx::query("DELETE FROM savedar WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        sqlx::query("DELETE FROM favorites WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".into()));
        }

        tx.commit().await.map_err(AppError::Database)
    }
}

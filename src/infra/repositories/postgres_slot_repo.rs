use crate::domain::{
    models::slot::{AppointmentSlot, ArtistSlotRow},
    ports::SlotRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct PostgresSlotRepo {
    pool: PgPool,
}

impl PostgresSlotRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotRepository for PostgresSlotRepo {
    async fn create(&self, slot: &AppointmentSlot) -> Result<AppointmentSlot, AppError> {
        sqlx::query_as::<_, AppointmentSlot>(
            "INSERT INTO appointmentslots (slot_id, artist_id, start_time, end_time, duration_min, is_booked, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(&slot.slot_id)
        .bind(&slot.artist_id)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .bind(slot.duration_min)
        .bind(slot.is_booked)
        .bind(slot.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, slot_id: &str) -> Result<Option<AppointmentSlot>, AppError> {
        sqlx::query_as::<_, AppointmentSlot>("SELECT * FROM appointmentslots WHERE slot_id = $1")
            .bind(slot_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_overlapping(
        &self,
        artist_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<AppointmentSlot>, AppError> {
        // Half-open windows: back-to-back slots do not collide.
        sqlx::query_as::<_, AppointmentSlot>(
            "SELECT * FROM appointmentslots WHERE artist_id = $1 AND start_time < $2 AND end_time > $3 LIMIT 1",
        )
        .bind(artist_id)
        .bind(end)
        .bind(start)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_available(
        &self,
        artist_id: &str,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
    ) -> Result<Vec<AppointmentSlot>, AppError> {
        sqlx::query_as::<_, AppointmentSlot>(
            "SELECT * FROM appointmentslots
             WHERE artist_id = $1 AND start_time >= $2 AND start_time <= $3 AND is_booked = FALSE
             ORDER BY start_time ASC",
        )
        .bind(artist_id)
        .bind(day_start)
        .bind(day_end)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_future_unbooked(
        &self,
        artist_id: &str,
    ) -> Result<Vec<AppointmentSlot>, AppError> {
        sqlx::query_as::<_, AppointmentSlot>(
            "SELECT * FROM appointmentslots
             WHERE artist_id = $1 AND start_time > $2 AND is_booked = FALSE
             ORDER BY start_time ASC",
        )
        .bind(artist_id)
        .bind(Utc::now())
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_future_with_bookings(
        &self,
        artist_id: &str,
    ) -> Result<Vec<ArtistSlotRow>, AppError> {
        sqlx::query_as::<_, ArtistSlotRow>(
            "SELECT s.slot_id, s.start_time, s.duration_min, s.is_booked,
                    b.booking_id, u.first_name AS client_first_name, u.last_name AS client_last_name
             FROM appointmentslots s
             LEFT JOIN bookings b ON b.slot_id = s.slot_id AND b.status_id IN (1, 2, 3)
             LEFT JOIN users u ON u.user_id = b.user_id
             WHERE s.artist_id = $1 AND s.start_time > $2
             ORDER BY s.start_time ASC",
        )
        .bind(artist_id)
        .bind(Utc::now())
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete(&self, slot_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM appointmentslots WHERE slot_id = $1")
            .bind(slot_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Appointment slot not found".into()));
        }
        Ok(())
    }
}

use crate::domain::{
    models::booking::{ArtistBookingRow, Booking, BookingDetailRow, ClientBookingRow},
    ports::BookingRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const DETAIL_QUERY: &str = "
    SELECT b.booking_id, b.user_id, b.artist_id, b.slot_id, b.status_id,
           b.is_color, b.reference_url, b.comment, b.price, b.commission_amount, b.created_at,
           s.start_time, s.duration_min,
           sz.size, p.placement,
           au.user_id AS artist_user_id, au.first_name AS artist_first_name,
           au.last_name AS artist_last_name, au.email AS artist_email,
           au.phone_number AS artist_phone,
           a.image_url AS artist_image_url, a.street_address AS artist_street_address,
           c.name AS city_name, c.country_name,
           cu.first_name AS client_first_name, cu.last_name AS client_last_name,
           cu.email AS client_email, cu.phone_number AS client_phone,
           r.review_id, r.rating AS review_rating, r.comment AS review_comment,
           r.created_at AS review_created_at,
           ru.first_name AS reviewer_first_name, ru.last_name AS reviewer_last_name
    FROM bookings b
    JOIN appointmentslots s ON s.slot_id = b.slot_id
    JOIN artists a ON a.artist_id = b.artist_id
    JOIN users au ON au.user_id = a.user_id
    LEFT JOIN cities c ON c.city_id = a.city_id
    JOIN users cu ON cu.user_id = b.user_id
    JOIN sizes sz ON sz.size_id = b.size_id
    JOIN placements p ON p.placement_id = b.placement_id
    LEFT JOIN reviews r ON r.booking_id = b.booking_id
    LEFT JOIN users ru ON ru.user_id = r.user_id
    WHERE b.booking_id = ?";

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create_reserving_slot(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Guarded flip: the losing writer of a race sees zero rows here and
        // never reaches the insert.
        let reserved = sqlx::query(
            "UPDATE appointmentslots SET is_booked = 1 WHERE slot_id = ? AND is_booked = 0",
        )
        .bind(&booking.slot_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;
        if reserved.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "This appointment slot is already booked".to_string(),
            ));
        }

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (booking_id, user_id, artist_id, slot_id, status_id, size_id, placement_id, is_color, reference_url, comment, price, commission_amount, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&booking.booking_id)
        .bind(&booking.user_id)
        .bind(&booking.artist_id)
        .bind(&booking.slot_id)
        .bind(booking.status)
        .bind(booking.size_id)
        .bind(booking.placement_id)
        .bind(booking.is_color)
        .bind(&booking.reference_url)
        .bind(&booking.comment)
        .bind(booking.price)
        .bind(booking.commission_amount)
        .bind(booking.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, booking_id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_id = ?")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_detail(&self, booking_id: &str) -> Result<Option<BookingDetailRow>, AppError> {
        sqlx::query_as::<_, BookingDetailRow>(DETAIL_QUERY)
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn set_quote(
        &self,
        booking_id: &str,
        price: f64,
        commission: f64,
    ) -> Result<Booking, AppError> {
        // The WHERE clause makes the quote write-once even under races.
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET price = ?, commission_amount = ?, status_id = 2
             WHERE booking_id = ? AND price IS NULL AND status_id = 1
             RETURNING *",
        )
        .bind(price)
        .bind(commission)
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::Conflict("Price is already set".to_string()))
    }

    async fn confirm(&self, booking_id: &str) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status_id = 3 WHERE booking_id = ? AND status_id = 2 RETURNING *",
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::Conflict("Booking is not awaiting confirmation".to_string()))
    }

    async fn decline(&self, booking_id: &str, slot_id: &str) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let declined = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status_id = 4 WHERE booking_id = ? AND status_id = 2 RETURNING *",
        )
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::Conflict("Booking is not awaiting confirmation".to_string()))?;

        sqlx::query("UPDATE appointmentslots SET is_booked = 0 WHERE slot_id = ?")
            .bind(slot_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(declined)
    }

    async fn cancel(&self, booking_id: &str, slot_id: &str) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Re-cancelling a closed booking is rejected rather than silently
        // re-freeing a slot that may belong to a newer booking by now.
        let cancelled = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status_id = 5 WHERE booking_id = ? AND status_id IN (1, 2, 3) RETURNING *",
        )
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::Conflict("Booking is already closed".to_string()))?;

        sqlx::query("UPDATE appointmentslots SET is_booked = 0 WHERE slot_id = ?")
            .bind(slot_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(cancelled)
    }

    async fn list_for_artist(&self, artist_id: &str) -> Result<Vec<ArtistBookingRow>, AppError> {
        sqlx::query_as::<_, ArtistBookingRow>(
            "SELECT b.booking_id, b.status_id, b.is_color, b.reference_url, b.comment,
                    b.price, b.commission_amount, b.created_at,
                    s.start_time, s.duration_min,
                    sz.size, p.placement,
                    u.first_name AS client_first_name, u.last_name AS client_last_name,
                    u.email AS client_email, u.phone_number AS client_phone
             FROM bookings b
             JOIN appointmentslots s ON s.slot_id = b.slot_id
             JOIN users u ON u.user_id = b.user_id
             JOIN sizes sz ON sz.size_id = b.size_id
             JOIN placements p ON p.placement_id = b.placement_id
             WHERE b.artist_id = ?
             ORDER BY b.created_at DESC",
        )
        .bind(artist_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_for_client(&self, user_id: &str) -> Result<Vec<ClientBookingRow>, AppError> {
        sqlx::query_as::<_, ClientBookingRow>(
            "SELECT b.booking_id, b.artist_id, b.slot_id, b.status_id, b.is_color,
                    b.reference_url, b.comment, b.price, b.created_at,
                    s.start_time, s.duration_min,
                    sz.size, p.placement,
                    au.first_name AS artist_first_name, au.last_name AS artist_last_name,
                    a.image_url AS artist_image_url,
                    r.review_id, r.rating AS review_rating, r.comment AS review_comment,
                    r.created_at AS review_created_at
             FROM bookings b
             JOIN appointmentslots s ON s.slot_id = b.slot_id
             JOIN artists a ON a.artist_id = b.artist_id
             JOIN users au ON au.user_id = a.user_id
             JOIN sizes sz ON sz.size_id = b.size_id
             JOIN placements p ON p.placement_id = b.placement_id
             LEFT JOIN reviews r ON r.booking_id = b.booking_id
             WHERE b.user_id = ?
             ORDER BY b.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}

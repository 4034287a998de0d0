use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::BookingError;
use crate::models::{Booking, BookingCreate, BookingStatus};

use super::db::{FOREIGN_KEY_VIOLATION, has_code};

pub async fn list_bookings(pool: &PgPool) -> Result<Vec<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        r#"
        SELECT *
        FROM bookings
        ORDER BY date DESC, created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Bookings with `from <= date <= to`, oldest first.
pub async fn list_bookings_between(
    pool: &PgPool,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        r#"
        SELECT *
        FROM bookings
        WHERE date BETWEEN $1 AND $2
        ORDER BY date ASC, created_at ASC
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

pub async fn get_booking(pool: &PgPool, id: Uuid) -> Result<Option<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>(r#"SELECT * FROM bookings WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create_booking(pool: &PgPool, data: &BookingCreate) -> Result<Booking, BookingError> {
    data.validate().map_err(BookingError::Invalid)?;

    let result = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings (space_id, date, client_name, status, total_value)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(data.space_id)
    .bind(data.date)
    .bind(data.client_name.trim())
    .bind(data.status.as_str())
    .bind(data.total_value)
    .fetch_one(pool)
    .await;

    match result {
        Ok(b) => Ok(b),
        Err(e) if has_code(&e, FOREIGN_KEY_VIOLATION) => {
            Err(BookingError::UnknownSpace(data.space_id))
        }
        Err(e) => Err(BookingError::Database(e)),
    }
}

pub async fn update_booking_status(
    pool: &PgPool,
    id: Uuid,
    status: BookingStatus,
) -> Result<Booking, BookingError> {
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        UPDATE bookings
        SET status = $1
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(status.as_str())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    booking.ok_or(BookingError::NotFound(id))
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lodging_core::repository::{BookingRepository, StoreResult};
use lodging_shared::{Booking, UserId};
use sqlx::PgPool;

use crate::store_error;

/// Bookings backed by the `bookings` table, whose `UNIQUE (room_id)` and
/// `UNIQUE (user_id)` constraints surface as [`lodging_core::StoreError::Conflict`].
pub struct StoreBookingRepository {
    pool: PgPool,
}

impl StoreBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i32,
    user_id: i32,
    room_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            user_id: row.user_id,
            room_id: row.room_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const BOOKING_COLUMNS: &str = "id, user_id, room_id, created_at, updated_at";

#[async_trait]
impl BookingRepository for StoreBookingRepository {
    async fn find_by_room_id(&self, room_id: i32) -> StoreResult<Option<Booking>> {
        let row: Option<BookingRow> =
            sqlx::query_as(&format!("SELECT {} FROM bookings WHERE room_id = $1", BOOKING_COLUMNS))
                .bind(room_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(store_error)?;

        Ok(row.map(Booking::from))
    }

    async fn find_by_user_id(&self, user_id: UserId) -> StoreResult<Option<Booking>> {
        let row: Option<BookingRow> =
            sqlx::query_as(&format!("SELECT {} FROM bookings WHERE user_id = $1", BOOKING_COLUMNS))
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(store_error)?;

        Ok(row.map(Booking::from))
    }

    async fn create(&self, room_id: i32, user_id: UserId) -> StoreResult<Booking> {
        let row: BookingRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO bookings (user_id, room_id, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(user_id)
        .bind(room_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.into())
    }

    async fn update_room(&self, booking_id: i32, room_id: i32) -> StoreResult<Booking> {
        let row: BookingRow = sqlx::query_as(&format!(
            r#"
            UPDATE bookings SET room_id = $1, updated_at = $2 WHERE id = $3
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(room_id)
        .bind(Utc::now())
        .bind(booking_id)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.into())
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lodging_core::repository::{HotelRepository, StoreResult};
use lodging_shared::{Hotel, HotelWithRooms, Room};
use sqlx::PgPool;

use crate::store_error;

pub struct StoreHotelRepository {
    pool: PgPool,
}

impl StoreHotelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct HotelRow {
    id: i32,
    name: String,
    image: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<HotelRow> for Hotel {
    fn from(row: HotelRow) -> Self {
        Hotel {
            id: row.id,
            name: row.name,
            image: row.image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RoomRow {
    id: i32,
    name: String,
    capacity: i32,
    hotel_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Room {
            id: row.id,
            name: row.name,
            capacity: row.capacity,
            hotel_id: row.hotel_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl HotelRepository for StoreHotelRepository {
    async fn list_hotels(&self) -> StoreResult<Vec<Hotel>> {
        let rows: Vec<HotelRow> = sqlx::query_as(
            "SELECT id, name, image, created_at, updated_at FROM hotels ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(rows.into_iter().map(Hotel::from).collect())
    }

    async fn find_hotel_with_rooms(&self, hotel_id: i32) -> StoreResult<Option<HotelWithRooms>> {
        let hotel: Option<HotelRow> = sqlx::query_as(
            "SELECT id, name, image, created_at, updated_at FROM hotels WHERE id = $1",
        )
        .bind(hotel_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        let Some(hotel) = hotel else {
            return Ok(None);
        };

        let rooms: Vec<RoomRow> = sqlx::query_as(
            r#"
            SELECT id, name, capacity, hotel_id, created_at, updated_at
            FROM rooms
            WHERE hotel_id = $1
            ORDER BY id
            "#,
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(Some(HotelWithRooms {
            hotel: hotel.into(),
            rooms: rooms.into_iter().map(Room::from).collect(),
        }))
    }

    async fn find_room_by_id(&self, room_id: i32) -> StoreResult<Option<Room>> {
        let row: Option<RoomRow> = sqlx::query_as(
            "SELECT id, name, capacity, hotel_id, created_at, updated_at FROM rooms WHERE id = $1",
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.map(Room::from))
    }
}

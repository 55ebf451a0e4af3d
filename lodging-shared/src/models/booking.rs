use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::hotel::Room;
use crate::UserId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i32,
    pub user_id: UserId,
    pub room_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read-side view of a booking joined with the room it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingWithRoom {
    pub id: i32,
    #[serde(rename = "Room")]
    pub room: Room,
}

use async_trait::async_trait;
use lodging_shared::{
    Booking, Enrollment, Hotel, HotelWithRooms, Room, Session, TicketType, TicketWithType, UserId,
};

use crate::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Repository trait for enrollment lookups
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: UserId) -> StoreResult<Option<Enrollment>>;
}

/// Repository trait for tickets and their types
#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn find_by_enrollment_id(
        &self,
        enrollment_id: i32,
    ) -> StoreResult<Option<TicketWithType>>;

    async fn find_ticket_type_by_id(&self, ticket_type_id: i32) -> StoreResult<Option<TicketType>>;
}

/// Repository trait for the hotel catalog
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// All hotels, ordered by id.
    async fn list_hotels(&self) -> StoreResult<Vec<Hotel>>;

    async fn find_hotel_with_rooms(&self, hotel_id: i32) -> StoreResult<Option<HotelWithRooms>>;

    async fn find_room_by_id(&self, room_id: i32) -> StoreResult<Option<Room>>;
}

/// Repository trait for bookings.
///
/// Implementations must reject a write that would leave two bookings on one
/// room, or two bookings for one user, with [`StoreError::Conflict`].
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_room_id(&self, room_id: i32) -> StoreResult<Option<Booking>>;

    async fn find_by_user_id(&self, user_id: UserId) -> StoreResult<Option<Booking>>;

    async fn create(&self, room_id: i32, user_id: UserId) -> StoreResult<Booking>;

    async fn update_room(&self, booking_id: i32, room_id: i32) -> StoreResult<Booking>;
}

/// Repository trait for login sessions
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_by_token(&self, token: &str) -> StoreResult<Option<Session>>;
}

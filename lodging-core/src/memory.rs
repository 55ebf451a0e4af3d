use async_trait::async_trait;
use chrono::Utc;
use lodging_shared::pii::Masked;
use lodging_shared::{
    Booking, Enrollment, Hotel, HotelWithRooms, Room, Session, Ticket, TicketStatus, TicketType,
    TicketWithType, UserId,
};
use tokio::sync::RwLock;

use crate::repository::{
    BookingRepository, EnrollmentRepository, HotelRepository, SessionRepository, StoreResult,
    TicketRepository,
};
use crate::StoreError;

#[derive(Default)]
struct Tables {
    next_id: i32,
    hotels: Vec<Hotel>,
    rooms: Vec<Room>,
    enrollments: Vec<Enrollment>,
    ticket_types: Vec<TicketType>,
    tickets: Vec<Ticket>,
    bookings: Vec<Booking>,
    sessions: Vec<Session>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory store implementing every repository trait, with the same
/// uniqueness rules as the `bookings` table. Backs the test suites and local demos.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_hotel(&self, name: &str, image: &str) -> Hotel {
        let mut t = self.tables.write().await;
        let now = Utc::now();
        let hotel = Hotel {
            id: t.next_id(),
            name: name.to_string(),
            image: image.to_string(),
            created_at: now,
            updated_at: now,
        };
        t.hotels.push(hotel.clone());
        hotel
    }

    pub async fn insert_room(&self, hotel_id: i32, name: &str, capacity: i32) -> Room {
        let mut t = self.tables.write().await;
        let now = Utc::now();
        let room = Room {
            id: t.next_id(),
            name: name.to_string(),
            capacity,
            hotel_id,
            created_at: now,
            updated_at: now,
        };
        t.rooms.push(room.clone());
        room
    }

    pub async fn insert_enrollment(&self, user_id: UserId, name: &str) -> Enrollment {
        let mut t = self.tables.write().await;
        let now = Utc::now();
        let enrollment = Enrollment {
            id: t.next_id(),
            user_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        t.enrollments.push(enrollment.clone());
        enrollment
    }

    pub async fn insert_ticket_type(&self, is_remote: bool, includes_hotel: bool) -> TicketType {
        let mut t = self.tables.write().await;
        let now = Utc::now();
        let ticket_type = TicketType {
            id: t.next_id(),
            name: format!("remote={} hotel={}", is_remote, includes_hotel),
            price: if includes_hotel { 600 } else { 250 },
            is_remote,
            includes_hotel,
            created_at: now,
            updated_at: now,
        };
        t.ticket_types.push(ticket_type.clone());
        ticket_type
    }

    pub async fn insert_ticket(
        &self,
        enrollment_id: i32,
        ticket_type_id: i32,
        status: TicketStatus,
    ) -> Ticket {
        let mut t = self.tables.write().await;
        let now = Utc::now();
        let ticket = Ticket {
            id: t.next_id(),
            enrollment_id,
            ticket_type_id,
            status,
            created_at: now,
            updated_at: now,
        };
        t.tickets.push(ticket.clone());
        ticket
    }

    pub async fn insert_session(&self, user_id: UserId, token: &str) -> Session {
        let mut t = self.tables.write().await;
        let now = Utc::now();
        let session = Session {
            id: t.next_id(),
            user_id,
            token: Masked(token.to_string()),
            created_at: now,
            updated_at: now,
        };
        t.sessions.push(session.clone());
        session
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryStore {
    async fn find_by_user_id(&self, user_id: UserId) -> StoreResult<Option<Enrollment>> {
        let t = self.tables.read().await;
        Ok(t.enrollments.iter().find(|e| e.user_id == user_id).cloned())
    }
}

#[async_trait]
impl TicketRepository for InMemoryStore {
    async fn find_by_enrollment_id(
        &self,
        enrollment_id: i32,
    ) -> StoreResult<Option<TicketWithType>> {
        let t = self.tables.read().await;
        let Some(ticket) = t.tickets.iter().find(|tk| tk.enrollment_id == enrollment_id) else {
            return Ok(None);
        };
        let ticket_type = t
            .ticket_types
            .iter()
            .find(|tt| tt.id == ticket.ticket_type_id)
            .cloned()
            .ok_or_else(|| {
                StoreError::Backend(format!(
                    "ticket {} references a missing ticket type",
                    ticket.id
                ))
            })?;
        Ok(Some(TicketWithType { ticket: ticket.clone(), ticket_type }))
    }

    async fn find_ticket_type_by_id(&self, ticket_type_id: i32) -> StoreResult<Option<TicketType>> {
        let t = self.tables.read().await;
        Ok(t.ticket_types.iter().find(|tt| tt.id == ticket_type_id).cloned())
    }
}

#[async_trait]
impl HotelRepository for InMemoryStore {
    async fn list_hotels(&self) -> StoreResult<Vec<Hotel>> {
        let t = self.tables.read().await;
        let mut hotels = t.hotels.clone();
        hotels.sort_by_key(|h| h.id);
        Ok(hotels)
    }

    async fn find_hotel_with_rooms(&self, hotel_id: i32) -> StoreResult<Option<HotelWithRooms>> {
        let t = self.tables.read().await;
        let Some(hotel) = t.hotels.iter().find(|h| h.id == hotel_id) else {
            return Ok(None);
        };
        let rooms = t.rooms.iter().filter(|r| r.hotel_id == hotel_id).cloned().collect();
        Ok(Some(HotelWithRooms { hotel: hotel.clone(), rooms }))
    }

    async fn find_room_by_id(&self, room_id: i32) -> StoreResult<Option<Room>> {
        let t = self.tables.read().await;
        Ok(t.rooms.iter().find(|r| r.id == room_id).cloned())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn find_by_room_id(&self, room_id: i32) -> StoreResult<Option<Booking>> {
        let t = self.tables.read().await;
        Ok(t.bookings.iter().find(|b| b.room_id == room_id).cloned())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> StoreResult<Option<Booking>> {
        let t = self.tables.read().await;
        Ok(t.bookings.iter().find(|b| b.user_id == user_id).cloned())
    }

    async fn create(&self, room_id: i32, user_id: UserId) -> StoreResult<Booking> {
        let mut t = self.tables.write().await;
        if t.bookings.iter().any(|b| b.room_id == room_id) {
            return Err(StoreError::Conflict(format!("room {} is already booked", room_id)));
        }
        if t.bookings.iter().any(|b| b.user_id == user_id) {
            return Err(StoreError::Conflict(format!("user {} already holds a booking", user_id)));
        }
        let now = Utc::now();
        let booking = Booking {
            id: t.next_id(),
            user_id,
            room_id,
            created_at: now,
            updated_at: now,
        };
        t.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn update_room(&self, booking_id: i32, room_id: i32) -> StoreResult<Booking> {
        let mut t = self.tables.write().await;
        if t.bookings.iter().any(|b| b.room_id == room_id && b.id != booking_id) {
            return Err(StoreError::Conflict(format!("room {} is already booked", room_id)));
        }
        let booking = t
            .bookings
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or_else(|| StoreError::Backend(format!("booking {} does not exist", booking_id)))?;
        booking.room_id = room_id;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn find_by_token(&self, token: &str) -> StoreResult<Option<Session>> {
        let t = self.tables.read().await;
        Ok(t.sessions.iter().find(|s| s.token.expose() == token).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_booking_uniqueness_is_enforced_on_write() {
        let store = InMemoryStore::new();
        let hotel = store.insert_hotel("Copacabana Palace", "https://img/1.png").await;
        let room_a = store.insert_room(hotel.id, "101", 2).await;
        let room_b = store.insert_room(hotel.id, "102", 3).await;

        let booking = store.create(room_a.id, 1).await.unwrap();

        // same room, other user
        assert!(matches!(store.create(room_a.id, 2).await, Err(StoreError::Conflict(_))));
        // same user, other room
        assert!(matches!(store.create(room_b.id, 1).await, Err(StoreError::Conflict(_))));

        let other = store.create(room_b.id, 2).await.unwrap();
        assert!(matches!(
            store.update_room(booking.id, room_b.id).await,
            Err(StoreError::Conflict(_))
        ));
        assert_eq!(store.update_room(other.id, room_b.id).await.unwrap().room_id, room_b.id);
    }

    #[tokio::test]
    async fn test_hotel_with_rooms_only_contains_its_rooms() {
        let store = InMemoryStore::new();
        let first = store.insert_hotel("A", "a.png").await;
        let second = store.insert_hotel("B", "b.png").await;
        store.insert_room(first.id, "1", 1).await;
        store.insert_room(second.id, "2", 2).await;
        store.insert_room(first.id, "3", 3).await;

        let found = store.find_hotel_with_rooms(first.id).await.unwrap().unwrap();
        assert_eq!(found.hotel, first);
        assert_eq!(found.rooms.len(), 2);
        assert!(found.rooms.iter().all(|r| r.hotel_id == first.id));
        assert!(store.find_hotel_with_rooms(999).await.unwrap().is_none());
    }
}

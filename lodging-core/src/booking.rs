use std::sync::Arc;

use lodging_shared::{BookingWithRoom, UserId};
use tracing::{info, warn};

use crate::eligibility::is_hotel_eligible;
use crate::repository::{BookingRepository, EnrollmentRepository, HotelRepository, TicketRepository};
use crate::{CoreResult, DomainError, StoreError};

const ROOM_NOT_FOUND: &str = "Room not found";
const BOOKING_EXISTS: &str = "Booking already exists";
const TICKET_NOT_ELIGIBLE: &str = "Verify if ticket is paid, presencial and includes hotel";
const ROOM_ALREADY_BOOKED: &str = "Room is already booked";
const NO_BOOKING: &str = "this user does not have a booking";

/// Creates, reads and moves a user's single room booking.
///
/// Checks run in a fixed order (room exists, room free, then ticket or
/// ownership) and the one write happens only after all of them pass. The
/// storage layer's uniqueness constraints back the "room free" and "one
/// booking per user" rules against concurrent writers.
#[derive(Clone)]
pub struct BookingService {
    hotels: Arc<dyn HotelRepository>,
    bookings: Arc<dyn BookingRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    tickets: Arc<dyn TicketRepository>,
}

impl BookingService {
    pub fn new(
        hotels: Arc<dyn HotelRepository>,
        bookings: Arc<dyn BookingRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        tickets: Arc<dyn TicketRepository>,
    ) -> Self {
        Self { hotels, bookings, enrollments, tickets }
    }

    pub async fn create_booking(&self, room_id: i32, user_id: UserId) -> CoreResult<i32> {
        self.ensure_room_exists(room_id).await?;

        if self.bookings.find_by_room_id(room_id).await?.is_some() {
            return Err(DomainError::ForbiddenBooking(BOOKING_EXISTS.to_string()));
        }

        self.ensure_ticket_eligible(user_id).await?;

        let booking = self
            .bookings
            .create(room_id, user_id)
            .await
            .map_err(|e| conflict_as_forbidden(e, BOOKING_EXISTS))?;

        info!(booking_id = booking.id, room_id, user_id, "Booking created");
        Ok(booking.id)
    }

    pub async fn find_booking(&self, user_id: UserId) -> CoreResult<BookingWithRoom> {
        let booking = self
            .bookings
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(DomainError::not_found)?;

        let room = self
            .hotels
            .find_room_by_id(booking.room_id)
            .await?
            .ok_or_else(|| {
                StoreError::Backend(format!("booking {} references a missing room", booking.id))
            })?;

        Ok(BookingWithRoom { id: booking.id, room })
    }

    /// Moves the caller's booking to `room_id`, keeping its id.
    ///
    /// Without a `room_id` only the ownership check runs and the booking is left as is.
    pub async fn update_booking(
        &self,
        room_id: Option<i32>,
        user_id: UserId,
        booking_id: i32,
    ) -> CoreResult<i32> {
        if let Some(room_id) = room_id {
            self.ensure_room_exists(room_id).await?;

            if self.bookings.find_by_room_id(room_id).await?.is_some() {
                return Err(DomainError::ForbiddenBooking(ROOM_ALREADY_BOOKED.to_string()));
            }
        }

        match self.bookings.find_by_user_id(user_id).await? {
            Some(current) if current.id == booking_id => {}
            _ => {
                warn!(
                    user_id,
                    booking_id,
                    "Booking update rejected, caller does not own the booking"
                );
                return Err(DomainError::ForbiddenBooking(NO_BOOKING.to_string()));
            }
        }

        let Some(room_id) = room_id else {
            return Ok(booking_id);
        };

        let booking = self
            .bookings
            .update_room(booking_id, room_id)
            .await
            .map_err(|e| conflict_as_forbidden(e, ROOM_ALREADY_BOOKED))?;

        info!(booking_id = booking.id, room_id, user_id, "Booking moved");
        Ok(booking.id)
    }

    async fn ensure_room_exists(&self, room_id: i32) -> CoreResult<()> {
        match self.hotels.find_room_by_id(room_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(ROOM_NOT_FOUND.to_string())),
        }
    }

    /// Same rule as the hotel catalog gate, reported as a booking refusal.
    async fn ensure_ticket_eligible(&self, user_id: UserId) -> CoreResult<()> {
        let not_eligible = || DomainError::ForbiddenBooking(TICKET_NOT_ELIGIBLE.to_string());

        let enrollment = self
            .enrollments
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(not_eligible)?;
        let ticket = self
            .tickets
            .find_by_enrollment_id(enrollment.id)
            .await?
            .ok_or_else(not_eligible)?
            .ticket;
        // resolved from the ticket's own ticket_type_id, not the joined row
        let ticket_type = self
            .tickets
            .find_ticket_type_by_id(ticket.ticket_type_id)
            .await?
            .ok_or_else(not_eligible)?;

        if !is_hotel_eligible(&ticket, &ticket_type) {
            return Err(not_eligible());
        }
        Ok(())
    }
}

fn conflict_as_forbidden(err: StoreError, message: &str) -> DomainError {
    match err {
        StoreError::Conflict(detail) => {
            warn!(%detail, "Booking write hit a uniqueness constraint");
            DomainError::ForbiddenBooking(message.to_string())
        }
        other => DomainError::Store(other),
    }
}

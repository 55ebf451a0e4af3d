pub mod models;
pub mod pii;

pub use models::booking::{Booking, BookingWithRoom};
pub use models::hotel::{Hotel, HotelWithRooms, Room};
pub use models::session::Session;
pub use models::ticket::{Enrollment, Ticket, TicketStatus, TicketType, TicketWithType};

/// Opaque identity key of a platform user.
pub type UserId = i32;

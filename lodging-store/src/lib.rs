pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod hotel_repo;
pub mod session_repo;
pub mod ticket_repo;

pub use booking_repo::StoreBookingRepository;
pub use database::DbClient;
pub use hotel_repo::StoreHotelRepository;
pub use session_repo::StoreSessionRepository;
pub use ticket_repo::{StoreEnrollmentRepository, StoreTicketRepository};

use lodging_core::StoreError;

const UNIQUE_VIOLATION: &str = "23505";

/// Translates a driver error, surfacing unique-constraint violations as conflicts.
pub(crate) fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            return StoreError::Conflict(constraint);
        }
    }
    tracing::error!("Database error: {}", err);
    StoreError::Backend(err.to_string())
}

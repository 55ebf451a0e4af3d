pub mod booking;
pub mod eligibility;
pub mod hotels;
pub mod memory;
pub mod repository;

pub use booking::BookingService;
pub use hotels::HotelService;

/// Failures raised by a persistence accessor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("Conflicting write: {0}")]
    Conflict(String),
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Coarse classification of a [`DomainError`], used by the transport layer to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    PaymentRequired,
    ForbiddenBooking,
    BadRequest,
    Unauthorized,
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    PaymentRequired(String),
    #[error("{0}")]
    ForbiddenBooking(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    pub fn not_found() -> Self {
        DomainError::NotFound("No result for this search!".to_string())
    }

    pub fn payment_required() -> Self {
        DomainError::PaymentRequired("No payment found for this request".to_string())
    }

    pub fn unauthorized() -> Self {
        DomainError::Unauthorized("You must be signed in to continue".to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::NotFound(_) => ErrorKind::NotFound,
            DomainError::PaymentRequired(_) => ErrorKind::PaymentRequired,
            DomainError::ForbiddenBooking(_) => ErrorKind::ForbiddenBooking,
            DomainError::BadRequest(_) => ErrorKind::BadRequest,
            DomainError::Unauthorized(_) => ErrorKind::Unauthorized,
            DomainError::Store(_) => ErrorKind::Internal,
        }
    }

    /// Stable error name carried in response bodies.
    pub fn name(&self) -> &'static str {
        match self {
            DomainError::NotFound(_) => "NotFoundError",
            DomainError::PaymentRequired(_) => "PaymentRequiredError",
            DomainError::ForbiddenBooking(_) => "ForbiddenBookingError",
            DomainError::BadRequest(_) => "RequestError",
            DomainError::Unauthorized(_) => "UnauthorizedError",
            DomainError::Store(_) => "InternalServerError",
        }
    }
}

pub type CoreResult<T> = Result<T, DomainError>;

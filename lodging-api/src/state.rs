use std::sync::Arc;

use lodging_core::eligibility::EligibilityEvaluator;
use lodging_core::repository::{
    BookingRepository, EnrollmentRepository, HotelRepository, SessionRepository, TicketRepository,
};
use lodging_core::{BookingService, HotelService};
use lodging_shared::pii::Masked;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: Masked<String>,
}

/// The persistence accessors the services are built from.
#[derive(Clone)]
pub struct Repositories {
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub tickets: Arc<dyn TicketRepository>,
    pub hotels: Arc<dyn HotelRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl Repositories {
    /// Uses one store for every accessor.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: EnrollmentRepository
            + TicketRepository
            + HotelRepository
            + BookingRepository
            + SessionRepository
            + 'static,
    {
        Self {
            enrollments: store.clone(),
            tickets: store.clone(),
            hotels: store.clone(),
            bookings: store.clone(),
            sessions: store,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub hotels: HotelService,
    pub bookings: BookingService,
    pub sessions: Arc<dyn SessionRepository>,
    pub auth: AuthConfig,
    pub allowed_origins: Vec<String>,
}

impl AppState {
    pub fn new(repos: Repositories, auth: AuthConfig, allowed_origins: Vec<String>) -> Self {
        let eligibility =
            EligibilityEvaluator::new(repos.enrollments.clone(), repos.tickets.clone());
        Self {
            hotels: HotelService::new(eligibility, repos.hotels.clone()),
            bookings: BookingService::new(
                repos.hotels,
                repos.bookings,
                repos.enrollments,
                repos.tickets,
            ),
            sessions: repos.sessions,
            auth,
            allowed_origins,
        }
    }
}

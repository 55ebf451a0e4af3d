use std::sync::Arc;

use lodging_shared::{Ticket, TicketStatus, TicketType, UserId};
use tracing::debug;

use crate::repository::{EnrollmentRepository, TicketRepository};
use crate::{CoreResult, DomainError};

/// Hotel access requires a paid, in-person ticket whose type includes accommodation.
pub fn is_hotel_eligible(ticket: &Ticket, ticket_type: &TicketType) -> bool {
    ticket.status == TicketStatus::Paid && !ticket_type.is_remote && ticket_type.includes_hotel
}

/// Decides whether a user's enrollment and ticket grant access to the hotel catalog.
#[derive(Clone)]
pub struct EligibilityEvaluator {
    enrollments: Arc<dyn EnrollmentRepository>,
    tickets: Arc<dyn TicketRepository>,
}

impl EligibilityEvaluator {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        tickets: Arc<dyn TicketRepository>,
    ) -> Self {
        Self { enrollments, tickets }
    }

    /// Fails `NotFound` without an enrollment or ticket and `PaymentRequired`
    /// when the ticket does not cover a hotel stay.
    pub async fn check_hotel_eligibility(&self, user_id: UserId) -> CoreResult<()> {
        let enrollment = self
            .enrollments
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(DomainError::not_found)?;

        let ticket = self
            .tickets
            .find_by_enrollment_id(enrollment.id)
            .await?
            .ok_or_else(DomainError::not_found)?;

        if !is_hotel_eligible(&ticket.ticket, &ticket.ticket_type) {
            debug!(user_id, status = %ticket.ticket.status, "ticket does not grant hotel access");
            return Err(DomainError::payment_required());
        }

        Ok(())
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lodging_core::repository::{EnrollmentRepository, StoreResult, TicketRepository};
use lodging_core::StoreError;
use lodging_shared::{Enrollment, Ticket, TicketStatus, TicketType, TicketWithType, UserId};
use sqlx::PgPool;

use crate::store_error;

pub struct StoreEnrollmentRepository {
    pool: PgPool,
}

impl StoreEnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EnrollmentRow {
    id: i32,
    user_id: i32,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl EnrollmentRepository for StoreEnrollmentRepository {
    async fn find_by_user_id(&self, user_id: UserId) -> StoreResult<Option<Enrollment>> {
        let row: Option<EnrollmentRow> = sqlx::query_as(
            "SELECT id, user_id, name, created_at, updated_at FROM enrollments WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.map(|r| Enrollment {
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }))
    }
}

pub struct StoreTicketRepository {
    pool: PgPool,
}

impl StoreTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TicketTypeRow {
    id: i32,
    name: String,
    price: i32,
    is_remote: bool,
    includes_hotel: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TicketTypeRow> for TicketType {
    fn from(row: TicketTypeRow) -> Self {
        TicketType {
            id: row.id,
            name: row.name,
            price: row.price,
            is_remote: row.is_remote,
            includes_hotel: row.includes_hotel,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// Ticket joined with its type in one round trip
#[derive(sqlx::FromRow)]
struct TicketWithTypeRow {
    id: i32,
    enrollment_id: i32,
    ticket_type_id: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    tt_name: String,
    tt_price: i32,
    tt_is_remote: bool,
    tt_includes_hotel: bool,
    tt_created_at: DateTime<Utc>,
    tt_updated_at: DateTime<Utc>,
}

impl TryFrom<TicketWithTypeRow> for TicketWithType {
    type Error = StoreError;

    fn try_from(row: TicketWithTypeRow) -> Result<Self, Self::Error> {
        let status: TicketStatus = row.status.parse().map_err(StoreError::Backend)?;
        Ok(TicketWithType {
            ticket: Ticket {
                id: row.id,
                enrollment_id: row.enrollment_id,
                ticket_type_id: row.ticket_type_id,
                status,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            ticket_type: TicketType {
                id: row.ticket_type_id,
                name: row.tt_name,
                price: row.tt_price,
                is_remote: row.tt_is_remote,
                includes_hotel: row.tt_includes_hotel,
                created_at: row.tt_created_at,
                updated_at: row.tt_updated_at,
            },
        })
    }
}

#[async_trait]
impl TicketRepository for StoreTicketRepository {
    async fn find_by_enrollment_id(
        &self,
        enrollment_id: i32,
    ) -> StoreResult<Option<TicketWithType>> {
        let row: Option<TicketWithTypeRow> = sqlx::query_as(
            r#"
            SELECT
                t.id, t.enrollment_id, t.ticket_type_id, t.status::TEXT AS status,
                t.created_at, t.updated_at,
                tt.name AS tt_name, tt.price AS tt_price,
                tt.is_remote AS tt_is_remote, tt.includes_hotel AS tt_includes_hotel,
                tt.created_at AS tt_created_at, tt.updated_at AS tt_updated_at
            FROM tickets t
            JOIN ticket_types tt ON tt.id = t.ticket_type_id
            WHERE t.enrollment_id = $1
            "#,
        )
        .bind(enrollment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(TicketWithType::try_from).transpose()
    }

    async fn find_ticket_type_by_id(&self, ticket_type_id: i32) -> StoreResult<Option<TicketType>> {
        let row: Option<TicketTypeRow> = sqlx::query_as(
            r#"
            SELECT id, name, price, is_remote, includes_hotel, created_at, updated_at
            FROM ticket_types
            WHERE id = $1
            "#,
        )
        .bind(ticket_type_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.map(TicketType::from))
    }
}

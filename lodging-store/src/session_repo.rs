use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lodging_core::repository::{SessionRepository, StoreResult};
use lodging_shared::pii::Masked;
use lodging_shared::Session;
use sqlx::PgPool;

use crate::store_error;

pub struct StoreSessionRepository {
    pool: PgPool,
}

impl StoreSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: i32,
    user_id: i32,
    token: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl SessionRepository for StoreSessionRepository {
    async fn find_by_token(&self, token: &str) -> StoreResult<Option<Session>> {
        let row: Option<SessionRow> = sqlx::query_as(
            "SELECT id, user_id, token, created_at, updated_at FROM sessions WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.map(|r| Session {
            id: r.id,
            user_id: r.user_id,
            token: Masked(r.token),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }))
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pii::Masked;
use crate::UserId;

/// A login session. Tokens are only honoured while a session row exists for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i32,
    pub user_id: UserId,
    pub token: Masked<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lodging_core::DomainError;
use lodging_shared::UserId;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// JWT Claims
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
}

/// Identity resolved by [`auth_middleware`], available to handlers as an `Extension`.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

pub fn issue_token(secret: &str, user_id: UserId) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims { user_id, exp: None };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
}

fn validation() -> Validation {
    let mut validation = Validation::default();
    // platform tokens carry no expiry; `exp` is still checked when present
    validation.required_spec_claims.clear();
    validation
}

// ============================================================================
// Authentication Middleware
// ============================================================================

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extract bearer token
    let Authorization(bearer) = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(DomainError::unauthorized)?;
    let token = bearer.token().to_string();

    // 2. Decode and validate JWT
    let token_data = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(state.auth.secret.expose().as_bytes()),
        &validation(),
    )
    .map_err(|e| {
        warn!("Rejected token: {}", e);
        DomainError::unauthorized()
    })?;

    // 3. Token must belong to a live session of the same user
    let session = state
        .sessions
        .find_by_token(&token)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(DomainError::unauthorized)?;

    if session.user_id != token_data.claims.user_id {
        warn!(
            session_user = session.user_id,
            claimed_user = token_data.claims.user_id,
            "Session user mismatch"
        );
        return Err(DomainError::unauthorized().into());
    }

    // 4. Inject identity
    req.extensions_mut().insert(AuthenticatedUser { user_id: session.user_id });

    Ok(next.run(req).await)
}

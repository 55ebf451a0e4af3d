use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::{get, put},
    Extension, Json, Router,
};
use lodging_shared::BookingWithRoom;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::AppError, extract::ValidatedJson, middleware::AuthenticatedUser, state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateBookingRequest {
    #[serde(rename = "roomId")]
    pub room_id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateBookingRequest {
    #[serde(rename = "roomId", default)]
    pub room_id: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct BookingIdResponse {
    #[serde(rename = "bookingId")]
    pub booking_id: i32,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/booking", get(find_booking).post(create_booking))
        .route("/booking/{booking_id}", put(update_booking))
}

/// GET /booking
async fn find_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<BookingWithRoom>, AppError> {
    let booking = state.bookings.find_booking(user.user_id).await?;
    Ok(Json(booking))
}

/// POST /booking
async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(req): ValidatedJson<CreateBookingRequest>,
) -> Result<Json<BookingIdResponse>, AppError> {
    let booking_id = state.bookings.create_booking(req.room_id, user.user_id).await?;
    info!("Booking confirmed: {}", booking_id);
    Ok(Json(BookingIdResponse { booking_id }))
}

/// PUT /booking/{booking_id}
async fn update_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    booking_id: Result<Path<i32>, PathRejection>,
    ValidatedJson(req): ValidatedJson<UpdateBookingRequest>,
) -> Result<Json<BookingIdResponse>, AppError> {
    let Path(booking_id) = booking_id.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let booking_id = state.bookings.update_booking(req.room_id, user.user_id, booking_id).await?;
    Ok(Json(BookingIdResponse { booking_id }))
}

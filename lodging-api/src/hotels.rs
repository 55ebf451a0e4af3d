use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use lodging_shared::{Hotel, HotelWithRooms};

use crate::{error::AppError, middleware::AuthenticatedUser, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hotels", get(list_hotels))
        .route("/hotels/{hotel_id}", get(list_rooms))
}

/// GET /hotels
async fn list_hotels(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Hotel>>, AppError> {
    let hotels = state.hotels.list_hotels(user.user_id).await?;
    Ok(Json(hotels))
}

/// GET /hotels/{hotel_id}
///
/// The id arrives as raw text so a malformed one is reported as a bad request.
async fn list_rooms(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(hotel_id): Path<String>,
) -> Result<Json<HotelWithRooms>, AppError> {
    let hotel = state.hotels.list_rooms(user.user_id, &hotel_id).await?;
    Ok(Json(hotel))
}

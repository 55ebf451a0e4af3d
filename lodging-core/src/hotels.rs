use std::sync::Arc;

use lodging_shared::{Hotel, HotelWithRooms, UserId};

use crate::eligibility::EligibilityEvaluator;
use crate::repository::HotelRepository;
use crate::{CoreResult, DomainError};

/// Hotel catalog reads, gated on hotel eligibility.
#[derive(Clone)]
pub struct HotelService {
    eligibility: EligibilityEvaluator,
    hotels: Arc<dyn HotelRepository>,
}

impl HotelService {
    pub fn new(eligibility: EligibilityEvaluator, hotels: Arc<dyn HotelRepository>) -> Self {
        Self { eligibility, hotels }
    }

    /// An empty catalog is reported as `NotFound`, never as an empty list.
    pub async fn list_hotels(&self, user_id: UserId) -> CoreResult<Vec<Hotel>> {
        self.eligibility.check_hotel_eligibility(user_id).await?;

        let hotels = self.hotels.list_hotels().await?;
        if hotels.is_empty() {
            return Err(DomainError::not_found());
        }
        Ok(hotels)
    }

    pub async fn list_rooms(&self, user_id: UserId, hotel_id: &str) -> CoreResult<HotelWithRooms> {
        let hotel_id = parse_hotel_id(hotel_id)?;

        self.eligibility.check_hotel_eligibility(user_id).await?;

        self.hotels
            .find_hotel_with_rooms(hotel_id)
            .await?
            .ok_or_else(DomainError::not_found)
    }
}

fn parse_hotel_id(raw: &str) -> CoreResult<i32> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(DomainError::BadRequest("Invalid Hotel Id".to_string())),
    }
}

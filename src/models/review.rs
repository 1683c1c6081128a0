use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A car review. `user_name` is denormalized at creation time and is not
/// re-synced if the author later renames; see DESIGN.md.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Review {
    #[serde(rename = "reviewId")]
    pub review_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "carId")]
    pub car_id: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub rating: i32,
    pub comment: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewCreate {
    #[serde(rename = "carId")]
    pub car_id: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    pub comment: String,
}

impl ReviewCreate {
    pub fn into_review(self, user_id: String, user_name: String) -> Review {
        Review {
            review_id: Uuid::new_v4().to_string(),
            user_id,
            car_id: self.car_id,
            user_name,
            rating: self.rating,
            comment: self.comment,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_are_validated() {
        let ok = ReviewCreate {
            car_id: "car-1".to_string(),
            rating: 5,
            comment: "Harika".to_string(),
        };
        assert!(ok.validate().is_ok());

        let too_low = ReviewCreate { rating: 0, ..ok.clone() };
        assert!(too_low.validate().is_err());

        let too_high = ReviewCreate { rating: 6, ..ok };
        assert!(too_high.validate().is_err());
    }
}

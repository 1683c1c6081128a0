use sqlx::{PgPool, Postgres, Transaction};

use crate::constants::API_NAME;
use crate::error::{is_unique_violation, AppError};
use crate::models::{Review, ReviewCreate};
use crate::repository::{CarRepository, ReviewRepository};

/// Mean rating rounded to one decimal place, half away from zero
/// (`f64::round` semantics), and the review count. An empty review set
/// yields (0.0, 0).
pub fn aggregate_ratings(ratings: &[i32]) -> (f64, i32) {
    if ratings.is_empty() {
        return (0.0, 0);
    }
    let sum: i32 = ratings.iter().sum();
    let mean = f64::from(sum) / ratings.len() as f64;
    ((mean * 10.0).round() / 10.0, ratings.len() as i32)
}

/// Owns every review mutation. Each create or delete runs in a single
/// transaction together with the rating recomputation, so the derived
/// columns on `cars` can never desync from the review set: if the
/// recomputation fails, the whole request fails and rolls back.
#[derive(Clone)]
pub struct ReviewService {
    reviews: ReviewRepository,
    cars: CarRepository,
    pool: PgPool,
}

impl ReviewService {
    pub fn new(reviews: ReviewRepository, cars: CarRepository, pool: PgPool) -> Self {
        Self { reviews, cars, pool }
    }

    pub async fn create_review(
        &self,
        user_id: &str,
        user_name: &str,
        data: ReviewCreate,
    ) -> Result<Review, AppError> {
        if !self.cars.exists(&data.car_id).await? {
            return Err(AppError::NotFound("Car not found".to_string()));
        }

        let review = data.into_review(user_id.to_string(), user_name.to_string());

        let mut tx = self.pool.begin().await?;

        self.reviews
            .create(&review, Some(&mut tx))
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("You have already reviewed this car".to_string())
                } else {
                    AppError::Database(e)
                }
            })?;

        self.recompute(&review.car_id, &mut tx).await?;
        tx.commit().await?;

        tracing::info!(
            "{} Created review {} for car {}",
            API_NAME,
            review.review_id,
            review.car_id
        );
        Ok(review)
    }

    /// Deletes a review previously located and authorized by the caller.
    pub async fn delete_review(&self, review: &Review) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let deleted = self.reviews.delete(&review.review_id, Some(&mut tx)).await?;
        if !deleted {
            // Gone between the caller's lookup and this delete.
            return Err(AppError::NotFound("Review not found".to_string()));
        }

        self.recompute(&review.car_id, &mut tx).await?;
        tx.commit().await?;

        tracing::info!(
            "{} Deleted review {} for car {}",
            API_NAME,
            review.review_id,
            review.car_id
        );
        Ok(())
    }

    /// Recomputes `average_rating` and `review_count` from the live review
    /// set. The only writer of those two columns.
    async fn recompute(
        &self,
        car_id: &str,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<(), AppError> {
        let ratings = self.reviews.ratings_for_car(car_id, tx).await?;
        let (average_rating, review_count) = aggregate_ratings(&ratings);
        self.cars
            .set_rating_fields(car_id, average_rating, review_count, tx)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::aggregate_ratings;

    #[test]
    fn empty_review_set_yields_zeroes() {
        assert_eq!(aggregate_ratings(&[]), (0.0, 0));
    }

    #[test]
    fn single_review_is_its_own_mean() {
        assert_eq!(aggregate_ratings(&[4]), (4.0, 1));
    }

    #[test]
    fn mean_of_four_and_two_is_three() {
        assert_eq!(aggregate_ratings(&[4, 2]), (3.0, 2));
    }

    #[test]
    fn mean_is_rounded_to_one_decimal() {
        // 5 + 4 + 4 = 13, mean 4.333... -> 4.3
        assert_eq!(aggregate_ratings(&[5, 4, 4]), (4.3, 3));
        // 5 + 4 = 9, mean 4.5 stays representable
        assert_eq!(aggregate_ratings(&[5, 4]), (4.5, 2));
        // 1 + 2 + 2 = 5, mean 1.666... -> 1.7
        assert_eq!(aggregate_ratings(&[1, 2, 2]), (1.7, 3));
    }

    #[test]
    fn halfway_cases_round_away_from_zero() {
        // mean 3.25 -> 3.3, not 3.2
        assert_eq!(aggregate_ratings(&[3, 3, 3, 4]), (3.3, 4));
    }
}

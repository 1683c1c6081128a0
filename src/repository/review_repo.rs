use sqlx::{PgPool, Postgres, Transaction};

use crate::models::Review;

const REVIEW_COLUMNS: &str = "review_id, user_id, car_id, user_name, rating, comment, created_at";

#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a review. A second review by the same user for the same car
    /// violates the (user_id, car_id) unique constraint.
    pub async fn create(
        &self,
        review: &Review,
        tx: Option<&mut Transaction<'_, Postgres>>,
    ) -> Result<(), sqlx::Error> {
        let query = sqlx::query(
            "INSERT INTO reviews (review_id, user_id, car_id, user_name, rating, comment, \
             created_at) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&review.review_id)
        .bind(&review.user_id)
        .bind(&review.car_id)
        .bind(&review.user_name)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at);

        if let Some(t) = tx {
            query.execute(&mut **t).await?;
        } else {
            query.execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn find_by_id(&self, review_id: &str) -> Result<Option<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {} FROM reviews WHERE review_id = $1",
            REVIEW_COLUMNS
        ))
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list_for_car(&self, car_id: &str) -> Result<Vec<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {} FROM reviews WHERE car_id = $1 ORDER BY created_at DESC",
            REVIEW_COLUMNS
        ))
        .bind(car_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {} FROM reviews WHERE user_id = $1 ORDER BY created_at DESC",
            REVIEW_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn delete(
        &self,
        review_id: &str,
        tx: Option<&mut Transaction<'_, Postgres>>,
    ) -> Result<bool, sqlx::Error> {
        let query = sqlx::query("DELETE FROM reviews WHERE review_id = $1").bind(review_id);
        let result = if let Some(t) = tx {
            query.execute(&mut **t).await?
        } else {
            query.execute(&self.pool).await?
        };
        Ok(result.rows_affected() > 0)
    }

    /// All ratings for a car, read inside the triggering transaction so the
    /// recomputation sees its own insert or delete.
    pub async fn ratings_for_car(
        &self,
        car_id: &str,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT rating FROM reviews WHERE car_id = $1")
            .bind(car_id)
            .fetch_all(&mut **tx)
            .await
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews")
            .fetch_one(&self.pool)
            .await
    }
}

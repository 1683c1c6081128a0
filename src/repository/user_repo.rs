use sqlx::PgPool;

use crate::models::{FavoriteComparison, Role, User, UserRecord};

const USER_COLUMNS: &str = "user_id, email, full_name, role, bio, location, profile_photo, \
     kvkk_accepted, email_notifications, created_at";

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new user. A duplicate email surfaces as a unique-constraint
    /// violation for the caller to map.
    pub async fn create(&self, user: &UserRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO users (user_id, email, full_name, role, hashed_password, bio, location, \
             profile_photo, kvkk_accepted, email_notifications, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(&user.user_id)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(user.role)
        .bind(&user.hashed_password)
        .bind(&user.bio)
        .bind(&user.location)
        .bind(&user.profile_photo)
        .bind(user.kvkk_accepted)
        .bind(user.email_notifications)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_record_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {}, hashed_password FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE user_id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn update_role(&self, user_id: &str, role: Role) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET role = $1 WHERE user_id = $2")
            .bind(role)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Idempotent: favoriting an already-favorited car is a no-op.
    pub async fn add_favorite_car(&self, user_id: &str, car_id: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO favorite_cars (user_id, car_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(car_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Removing a non-favorite is a no-op, not an error.
    pub async fn remove_favorite_car(
        &self,
        user_id: &str,
        car_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM favorite_cars WHERE user_id = $1 AND car_id = $2")
            .bind(user_id)
            .bind(car_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn favorite_car_ids(&self, user_id: &str) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT car_id FROM favorite_cars WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Idempotent by full value of the pair record.
    pub async fn add_favorite_comparison(
        &self,
        user_id: &str,
        comparison: &FavoriteComparison,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO favorite_comparisons (user_id, car1_id, car2_id, car1_name, car2_name) \
             VALUES ($1, $2, $3, $4, $5) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(&comparison.car1_id)
        .bind(&comparison.car2_id)
        .bind(&comparison.car1_name)
        .bind(&comparison.car2_name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn favorite_comparisons(
        &self,
        user_id: &str,
    ) -> Result<Vec<FavoriteComparison>, sqlx::Error> {
        sqlx::query_as::<_, FavoriteComparison>(
            "SELECT car1_id, car2_id, car1_name, car2_name FROM favorite_comparisons \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
    }
}

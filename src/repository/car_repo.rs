use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use crate::models::Car;

const CAR_COLUMNS: &str = "car_id, make, model, pack, year, fuel_type, engine_capacity, \
     horse_power, body_type, top_speed, acceleration, transmission, economy, weight, height, \
     width, drive_train, baggage_lt, brake_metre, price, photos, average_rating, review_count, \
     created_at";

/// Filters for the catalog listing. `make` is a case-insensitive substring
/// match, the other two are exact.
#[derive(Debug, Default)]
pub struct CarFilter {
    pub make: Option<String>,
    pub year: Option<i32>,
    pub fuel_type: Option<String>,
    pub skip: i64,
    pub limit: i64,
}

/// Sorted top-N catalog views.
#[derive(Debug, Clone, Copy)]
pub enum CarSort {
    /// Most reviewed, then best rated.
    Popular,
    Baggage,
    Acceleration,
    Economy,
    HorsePower,
    Price,
}

impl CarSort {
    fn order_clause(self) -> &'static str {
        match self {
            CarSort::Popular => "review_count DESC, average_rating DESC",
            CarSort::Baggage => "baggage_lt DESC",
            CarSort::Acceleration => "acceleration ASC",
            CarSort::Economy => "economy ASC",
            CarSort::HorsePower => "horse_power DESC",
            CarSort::Price => "price ASC",
        }
    }

    /// Cars without a listed price are excluded from the price ranking.
    fn where_clause(self) -> &'static str {
        match self {
            CarSort::Price => "WHERE price IS NOT NULL",
            _ => "",
        }
    }
}

#[derive(Clone)]
pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, car: &Car) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO cars (car_id, make, model, pack, year, fuel_type, engine_capacity, \
             horse_power, body_type, top_speed, acceleration, transmission, economy, weight, \
             height, width, drive_train, baggage_lt, brake_metre, price, photos, average_rating, \
             review_count, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
             $18, $19, $20, $21, $22, $23, $24)",
        )
        .bind(&car.car_id)
        .bind(&car.make)
        .bind(&car.model)
        .bind(&car.pack)
        .bind(car.year)
        .bind(&car.fuel_type)
        .bind(car.engine_capacity)
        .bind(car.horse_power)
        .bind(&car.body_type)
        .bind(car.top_speed)
        .bind(car.acceleration)
        .bind(&car.transmission)
        .bind(car.economy)
        .bind(car.weight)
        .bind(car.height)
        .bind(car.width)
        .bind(&car.drive_train)
        .bind(car.baggage_lt)
        .bind(car.brake_metre)
        .bind(car.price)
        .bind(&car.photos)
        .bind(car.average_rating)
        .bind(car.review_count)
        .bind(car.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(&self, car_id: &str) -> Result<Option<Car>, sqlx::Error> {
        sqlx::query_as::<_, Car>(&format!(
            "SELECT {} FROM cars WHERE car_id = $1",
            CAR_COLUMNS
        ))
        .bind(car_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn exists(&self, car_id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM cars WHERE car_id = $1)")
            .bind(car_id)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>, sqlx::Error> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM cars WHERE TRUE", CAR_COLUMNS));

        if let Some(make) = &filter.make {
            qb.push(" AND make ILIKE ");
            qb.push_bind(format!("%{}%", make));
        }
        if let Some(year) = filter.year {
            qb.push(" AND year = ");
            qb.push_bind(year);
        }
        if let Some(fuel_type) = &filter.fuel_type {
            qb.push(" AND fuel_type = ");
            qb.push_bind(fuel_type.clone());
        }

        qb.push(" ORDER BY created_at DESC OFFSET ");
        qb.push_bind(filter.skip);
        qb.push(" LIMIT ");
        qb.push_bind(filter.limit);

        qb.build_query_as::<Car>().fetch_all(&self.pool).await
    }

    /// Case-insensitive substring search over make and model.
    pub async fn search(&self, query: &str, limit: i64) -> Result<Vec<Car>, sqlx::Error> {
        let pattern = format!("%{}%", query);
        sqlx::query_as::<_, Car>(&format!(
            "SELECT {} FROM cars WHERE make ILIKE $1 OR model ILIKE $1 LIMIT $2",
            CAR_COLUMNS
        ))
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn top(&self, sort: CarSort, limit: i64) -> Result<Vec<Car>, sqlx::Error> {
        sqlx::query_as::<_, Car>(&format!(
            "SELECT {} FROM cars {} ORDER BY {} LIMIT $1",
            CAR_COLUMNS,
            sort.where_clause(),
            sort.order_clause()
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_many(&self, car_ids: &[String]) -> Result<Vec<Car>, sqlx::Error> {
        sqlx::query_as::<_, Car>(&format!(
            "SELECT {} FROM cars WHERE car_id = ANY($1)",
            CAR_COLUMNS
        ))
        .bind(car_ids)
        .fetch_all(&self.pool)
        .await
    }

    /// Full-row update of the descriptive attributes. The derived rating
    /// columns are deliberately not touched here.
    pub async fn update(&self, car: &Car) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cars SET make = $1, model = $2, pack = $3, year = $4, fuel_type = $5, \
             engine_capacity = $6, horse_power = $7, body_type = $8, top_speed = $9, \
             acceleration = $10, transmission = $11, economy = $12, weight = $13, height = $14, \
             width = $15, drive_train = $16, baggage_lt = $17, brake_metre = $18, price = $19, \
             photos = $20 WHERE car_id = $21",
        )
        .bind(&car.make)
        .bind(&car.model)
        .bind(&car.pack)
        .bind(car.year)
        .bind(&car.fuel_type)
        .bind(car.engine_capacity)
        .bind(car.horse_power)
        .bind(&car.body_type)
        .bind(car.top_speed)
        .bind(car.acceleration)
        .bind(&car.transmission)
        .bind(car.economy)
        .bind(car.weight)
        .bind(car.height)
        .bind(car.width)
        .bind(&car.drive_train)
        .bind(car.baggage_lt)
        .bind(car.brake_metre)
        .bind(car.price)
        .bind(&car.photos)
        .bind(&car.car_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deletes a car; its reviews go with it via ON DELETE CASCADE.
    pub async fn delete(&self, car_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cars WHERE car_id = $1")
            .bind(car_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Writes the derived rating columns. Only the rating recomputation
    /// calls this; always inside the triggering review transaction.
    pub async fn set_rating_fields(
        &self,
        car_id: &str,
        average_rating: f64,
        review_count: i32,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE cars SET average_rating = $1, review_count = $2 WHERE car_id = $3")
            .bind(average_rating)
            .bind(review_count)
            .bind(car_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await
    }
}

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::AdminUser;
use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{Car, CarCreate, CarUpdate};
use crate::repository::{CarFilter, CarSort};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars).post(create_car))
        .route("/search", get(search_cars))
        .route("/popular", get(popular_cars))
        .route("/best-baggage", get(best_baggage))
        .route("/best-acceleration", get(best_acceleration))
        .route("/best-economy", get(best_economy))
        .route("/best-horsepower", get(best_horsepower))
        .route("/best-price", get(best_price))
        .route("/:car_id", get(get_car).put(update_car).delete(delete_car))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub marka: Option<String>,
    pub year: Option<i32>,
    #[serde(rename = "fuelType")]
    pub fuel_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

/// Applies the documented bounds to a top-N limit parameter.
fn bounded_limit(limit: Option<i64>, default: i64, max: i64) -> Result<i64, AppError> {
    let limit = limit.unwrap_or(default);
    if limit < 1 || limit > max {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {}",
            max
        )));
    }
    Ok(limit)
}

async fn create_car(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Json(data): Json<CarCreate>,
) -> Result<Json<Car>, AppError> {
    let car = data.into_car();
    state.cars.create(&car).await?;
    tracing::info!("{} Created car {} ({} {})", API_NAME, car.car_id, car.make, car.model);
    Ok(Json(car))
}

async fn list_cars(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Car>>, AppError> {
    let skip = query.skip.unwrap_or(0);
    if skip < 0 {
        return Err(AppError::Validation("skip must be non-negative".to_string()));
    }
    let limit = bounded_limit(query.limit, 50, 100)?;

    let filter = CarFilter {
        make: query.marka,
        year: query.year,
        fuel_type: query.fuel_type,
        skip,
        limit,
    };
    let cars = state.cars.list(&filter).await?;
    Ok(Json(cars))
}

async fn search_cars(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Car>>, AppError> {
    if query.q.is_empty() {
        return Err(AppError::Validation("q must not be empty".to_string()));
    }
    let cars = state.cars.search(&query.q, 20).await?;
    Ok(Json(cars))
}

async fn popular_cars(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Car>>, AppError> {
    let limit = bounded_limit(query.limit, 8, 20)?;
    Ok(Json(state.cars.top(CarSort::Popular, limit).await?))
}

async fn best_baggage(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Car>>, AppError> {
    let limit = bounded_limit(query.limit, 5, 10)?;
    Ok(Json(state.cars.top(CarSort::Baggage, limit).await?))
}

async fn best_acceleration(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Car>>, AppError> {
    let limit = bounded_limit(query.limit, 5, 10)?;
    Ok(Json(state.cars.top(CarSort::Acceleration, limit).await?))
}

async fn best_economy(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Car>>, AppError> {
    let limit = bounded_limit(query.limit, 5, 10)?;
    Ok(Json(state.cars.top(CarSort::Economy, limit).await?))
}

async fn best_horsepower(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Car>>, AppError> {
    let limit = bounded_limit(query.limit, 5, 10)?;
    Ok(Json(state.cars.top(CarSort::HorsePower, limit).await?))
}

async fn best_price(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Car>>, AppError> {
    let limit = bounded_limit(query.limit, 5, 10)?;
    Ok(Json(state.cars.top(CarSort::Price, limit).await?))
}

async fn get_car(
    State(state): State<AppState>,
    Path(car_id): Path<String>,
) -> Result<Json<Car>, AppError> {
    let car = state
        .cars
        .find_by_id(&car_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;
    Ok(Json(car))
}

async fn update_car(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Path(car_id): Path<String>,
    Json(data): Json<CarUpdate>,
) -> Result<Json<Car>, AppError> {
    if data.is_empty() {
        return Err(AppError::BadRequest("No data to update".to_string()));
    }

    let mut car = state
        .cars
        .find_by_id(&car_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

    data.apply_to(&mut car);
    if !state.cars.update(&car).await? {
        return Err(AppError::NotFound("Car not found".to_string()));
    }

    tracing::info!("{} Updated car {}", API_NAME, car_id);
    Ok(Json(car))
}

async fn delete_car(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Path(car_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.cars.delete(&car_id).await? {
        return Err(AppError::NotFound("Car not found".to_string()));
    }

    tracing::info!("{} Deleted car {} and its reviews", API_NAME, car_id);
    Ok(Json(json!({ "message": "Car deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::bounded_limit;
    use crate::error::AppError;

    #[test]
    fn missing_limit_falls_back_to_default() {
        assert_eq!(bounded_limit(None, 50, 100).unwrap(), 50);
    }

    #[test]
    fn out_of_range_limits_are_rejected() {
        assert!(matches!(bounded_limit(Some(0), 50, 100), Err(AppError::Validation(_))));
        assert!(matches!(bounded_limit(Some(101), 50, 100), Err(AppError::Validation(_))));
        assert_eq!(bounded_limit(Some(100), 50, 100).unwrap(), 100);
        assert_eq!(bounded_limit(Some(1), 50, 100).unwrap(), 1);
    }
}

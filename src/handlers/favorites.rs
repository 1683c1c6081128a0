use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::json;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::{Car, FavoriteComparison};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cars", get(get_favorite_cars))
        .route("/cars/:car_id", post(add_favorite_car).delete(remove_favorite_car))
        .route("/comparisons", get(get_favorite_comparisons).post(add_favorite_comparison))
}

async fn add_favorite_car(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Path(car_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.cars.exists(&car_id).await? {
        return Err(AppError::NotFound("Car not found".to_string()));
    }

    state.users.add_favorite_car(&claims.sub, &car_id).await?;
    Ok(Json(json!({ "message": "Car added to favorites" })))
}

async fn remove_favorite_car(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Path(car_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.users.remove_favorite_car(&claims.sub, &car_id).await?;
    Ok(Json(json!({ "message": "Car removed from favorites" })))
}

async fn get_favorite_cars(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Car>>, AppError> {
    let car_ids = state.users.favorite_car_ids(&claims.sub).await?;
    if car_ids.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let cars = state.cars.find_many(&car_ids).await?;
    Ok(Json(cars))
}

async fn add_favorite_comparison(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Json(comparison): Json<FavoriteComparison>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .users
        .add_favorite_comparison(&claims.sub, &comparison)
        .await?;
    Ok(Json(json!({ "message": "Comparison added to favorites" })))
}

async fn get_favorite_comparisons(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<FavoriteComparison>>, AppError> {
    let comparisons = state.users.favorite_comparisons(&claims.sub).await?;
    Ok(Json(comparisons))
}

use axum::{extract::State, response::Json, routing::post, Router};
use serde_json::json;

use crate::error::AppError;
use crate::models::ComparisonRequest;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/compare", post(compare_cars))
}

/// A comparison is transient: two catalog fetches returned side by side.
async fn compare_cars(
    State(state): State<AppState>,
    Json(request): Json<ComparisonRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let car1 = state.cars.find_by_id(&request.car1_id).await?;
    let car2 = state.cars.find_by_id(&request.car2_id).await?;

    match (car1, car2) {
        (Some(car1), Some(car2)) => Ok(Json(json!({ "car1": car1, "car2": car2 }))),
        _ => Err(AppError::NotFound("One or both cars not found".to_string())),
    }
}

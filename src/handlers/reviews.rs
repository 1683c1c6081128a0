use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde_json::json;
use validator::Validate;

use crate::auth::{require_owner_or_admin, AuthUser};
use crate::error::AppError;
use crate::models::{Review, ReviewCreate};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review))
        .route("/car/:car_id", get(car_reviews))
        .route("/user", get(user_reviews))
        .route("/:review_id", delete(delete_review))
}

async fn create_review(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Json(data): Json<ReviewCreate>,
) -> Result<Json<Review>, AppError> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // The author's display name is captured here and denormalized onto the
    // review; it is not re-synced on later renames.
    let user = state
        .users
        .find_by_id(&claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let review = state
        .review_service
        .create_review(&claims.sub, &user.full_name, data)
        .await?;
    Ok(Json(review))
}

async fn car_reviews(
    State(state): State<AppState>,
    Path(car_id): Path<String>,
) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = state.reviews.list_for_car(&car_id).await?;
    Ok(Json(reviews))
}

async fn user_reviews(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = state.reviews.list_for_user(&claims.sub).await?;
    Ok(Json(reviews))
}

async fn delete_review(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let review = state
        .reviews
        .find_by_id(&review_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    require_owner_or_admin(&claims, &review.user_id)?;

    state.review_service.delete_review(&review).await?;
    Ok(Json(json!({ "message": "Review deleted successfully" })))
}

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;

use crate::auth::AdminUser;
use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{Role, User};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:user_id/role", put(update_user_role))
        .route("/stats", get(stats))
}

async fn list_users(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

#[derive(Debug, Deserialize)]
struct RoleQuery {
    role: String,
}

async fn update_user_role(
    AdminUser(claims): AdminUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<RoleQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let role = Role::from_str(&query.role)
        .map_err(|_| AppError::BadRequest("Invalid role".to_string()))?;

    if !state.users.update_role(&user_id, role).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    tracing::info!(
        "{} Admin {} set role of user {} to {}",
        API_NAME,
        claims.sub,
        user_id,
        role
    );
    Ok(Json(json!({ "message": "User role updated successfully" })))
}

async fn stats(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let total_cars = state.cars.count().await?;
    let total_users = state.users.count().await?;
    let total_reviews = state.reviews.count().await?;

    Ok(Json(json!({
        "totalCars": total_cars,
        "totalUsers": total_users,
        "totalReviews": total_reviews
    })))
}

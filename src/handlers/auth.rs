use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::json;
use validator::Validate;

use crate::auth::AuthUser;
use crate::constants::API_NAME;
use crate::error::{is_unique_violation, AppError};
use crate::models::{Role, User, UserCreate, UserLogin};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

fn token_response(
    state: &AppState,
    user_id: &str,
    email: &str,
    full_name: &str,
    role: Role,
) -> Result<Json<serde_json::Value>, AppError> {
    let access_token = state.auth.issue_token(user_id, email, role)?;
    Ok(Json(json!({
        "access_token": access_token,
        "token_type": "bearer",
        "user": {
            "userId": user_id,
            "email": email,
            "fullName": full_name,
            "role": role,
        }
    })))
}

async fn register(
    State(state): State<AppState>,
    Json(data): Json<UserCreate>,
) -> Result<Json<serde_json::Value>, AppError> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let hashed = state.auth.hash_password(&data.password)?;
    let record = data.into_record(hashed);

    state.users.create(&record).await.map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Email already registered".to_string())
        } else {
            AppError::Database(e)
        }
    })?;

    tracing::info!("{} Registered user {}", API_NAME, record.user_id);

    token_response(
        &state,
        &record.user_id,
        &record.email,
        &record.full_name,
        record.role,
    )
}

async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<UserLogin>,
) -> Result<Json<serde_json::Value>, AppError> {
    let invalid = || AppError::Unauthenticated("Invalid email or password".to_string());

    let record = state
        .users
        .find_record_by_email(&credentials.email)
        .await?
        .ok_or_else(invalid)?;

    if !state
        .auth
        .verify_password(&credentials.password, &record.hashed_password)?
    {
        return Err(invalid());
    }

    tracing::info!("{} User {} logged in", API_NAME, record.user_id);

    token_response(
        &state,
        &record.user_id,
        &record.email,
        &record.full_name,
        record.role,
    )
}

async fn me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<User>, AppError> {
    let user = state
        .users
        .find_by_id(&claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Closed role enumeration; the only two values the platform recognizes.
/// Stored as lowercase text, validated at every boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Invalid role: {}", other)),
        }
    }
}

/// A user row without the password hash; safe to serialize to clients.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub role: Role,
    pub bio: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "profilePhoto")]
    pub profile_photo: Option<String>,
    #[serde(rename = "kvkkAccepted")]
    pub kvkk_accepted: bool,
    #[serde(rename = "emailNotifications")]
    pub email_notifications: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Full user row including the stored hash; never leaves the process.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub hashed_password: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub profile_photo: Option<String>,
    pub kvkk_accepted: bool,
    pub email_notifications: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(rename = "fullName")]
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[serde(rename = "kvkkAccepted", default = "default_true")]
    pub kvkk_accepted: bool,
    #[serde(rename = "emailNotifications", default = "default_true")]
    pub email_notifications: bool,
}

fn default_true() -> bool {
    true
}

impl UserCreate {
    pub fn into_record(self, hashed_password: String) -> UserRecord {
        UserRecord {
            user_id: Uuid::new_v4().to_string(),
            email: self.email,
            full_name: self.full_name,
            role: Role::User,
            hashed_password,
            bio: None,
            location: None,
            profile_photo: None,
            kvkk_accepted: self.kvkk_accepted,
            email_notifications: self.email_notifications,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

/// A bookmarked comparison pair. Deduplicated by value, not by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FavoriteComparison {
    #[serde(rename = "car1Id")]
    pub car1_id: String,
    #[serde(rename = "car2Id")]
    pub car2_id: String,
    #[serde(rename = "car1Name")]
    pub car1_name: String,
    #[serde(rename = "car2Name")]
    pub car2_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_round_trips_through_str() {
        assert_eq!(Role::from_str("user").unwrap(), Role::User);
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert_eq!(Role::Admin.as_str(), "admin");
        assert!(Role::from_str("superuser").is_err());
    }

    #[test]
    fn new_registrations_get_the_user_role() {
        let record = UserCreate {
            email: "ali@example.com".to_string(),
            password: "s3cret".to_string(),
            full_name: "Ali Veli".to_string(),
            kvkk_accepted: true,
            email_notifications: true,
        }
        .into_record("hash".to_string());
        assert_eq!(record.role, Role::User);
        assert!(!record.user_id.is_empty());
    }
}

use crate::error::AppError;
use crate::models::Role;

use super::Claims;

/// Admin-only actions: catalog mutation, user administration.
pub fn require_admin(claims: &Claims) -> Result<(), AppError> {
    if claims.role == Role::Admin {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin access required".to_string()))
    }
}

/// Owner-or-admin actions; used for review deletion.
pub fn require_owner_or_admin(claims: &Claims, resource_owner_id: &str) -> Result<(), AppError> {
    if claims.sub == resource_owner_id || claims.role == Role::Admin {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Not authorized to modify this resource".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, role: Role) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: format!("{}@example.com", sub),
            role,
            exp: 0,
        }
    }

    #[test]
    fn require_admin_rejects_regular_users() {
        assert!(require_admin(&claims("u1", Role::Admin)).is_ok());
        assert!(matches!(
            require_admin(&claims("u1", Role::User)),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn owner_or_admin_allows_owner_and_admin_only() {
        assert!(require_owner_or_admin(&claims("u1", Role::User), "u1").is_ok());
        assert!(require_owner_or_admin(&claims("root", Role::Admin), "u1").is_ok());
        assert!(matches!(
            require_owner_or_admin(&claims("u2", Role::User), "u1"),
            Err(AppError::Forbidden(_))
        ));
    }
}

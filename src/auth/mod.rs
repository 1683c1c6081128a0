//! Authentication and authorization.
//!
//! `service` wraps password hashing (bcrypt) and JWT issuing/validation
//! (HS256); `guard` holds the pure authorization predicates; `extract`
//! provides the axum extractors that apply them to bearer tokens.

pub mod extract;
pub mod guard;
pub mod service;

pub use extract::{AdminUser, AuthUser};
pub use guard::{require_admin, require_owner_or_admin};
pub use service::{AuthService, Claims};

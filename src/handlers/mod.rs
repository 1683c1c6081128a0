pub mod admin;
pub mod auth;
pub mod cars;
pub mod compare;
pub mod favorites;
pub mod health;
pub mod reviews;

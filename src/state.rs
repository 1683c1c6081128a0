use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::AuthService;
use crate::repository::{CarRepository, ReviewRepository, UserRepository};
use crate::service::ReviewService;

/// Dependency-injected application state: the pool is opened once in main
/// and every component is constructed from it explicitly.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub cars: CarRepository,
    pub users: UserRepository,
    pub reviews: ReviewRepository,
    pub review_service: ReviewService,
}

// Lets the auth extractors pull the token service out of the state.
impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> AuthService {
        state.auth.clone()
    }
}

impl AppState {
    pub fn new(pool: PgPool, auth: AuthService) -> Self {
        let cars = CarRepository::new(pool.clone());
        let users = UserRepository::new(pool.clone());
        let reviews = ReviewRepository::new(pool.clone());
        let review_service = ReviewService::new(reviews.clone(), cars.clone(), pool);
        Self {
            auth,
            cars,
            users,
            reviews,
            review_service,
        }
    }
}

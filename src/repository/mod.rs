pub mod car_repo;
pub mod review_repo;
pub mod user_repo;

pub use car_repo::{CarFilter, CarRepository, CarSort};
pub use review_repo::ReviewRepository;
pub use user_repo::UserRepository;

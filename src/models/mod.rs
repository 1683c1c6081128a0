pub mod car;
pub mod review;
pub mod user;

pub use car::{Car, CarCreate, CarUpdate, ComparisonRequest};
pub use review::{Review, ReviewCreate};
pub use user::{FavoriteComparison, Role, User, UserCreate, UserLogin, UserRecord};

//! Seeds the database with a sample catalog and an admin account.
//! Idempotent: skips the catalog when cars already exist and the admin
//! account when the email is taken.

use anyhow::Context;
use carcompare_api::auth::AuthService;
use carcompare_api::config::Config;
use carcompare_api::models::{Car, CarCreate, Role, UserRecord};
use carcompare_api::repository::{CarRepository, UserRepository};
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

fn sample_cars() -> Vec<Car> {
    let specs = [
        // make, model, pack, year, fuel, cc, hp, body, top, accel, trans,
        // economy, weight, height, width, drive, baggage, brake, price
        ("Toyota", "Corolla", "1.6 Executive", 2024, "Benzin", 1598, 132, "Sedan", 190, 10.5, "Otomatik", 6.2, 1300, 1435, 1780, "Önden Çekiş", 470, Some(38), Some(1_250_000i64), "https://images.unsplash.com/photo-1623869675781-80aa31bfa4e8?w=800"),
        ("BMW", "3 Serisi", "320i M Sport", 2024, "Benzin", 1998, 184, "Sedan", 230, 7.1, "Otomatik", 6.8, 1540, 1440, 1827, "Arkadan İtiş", 480, Some(35), Some(2_850_000), "https://images.unsplash.com/photo-1555215695-3004980ad54e?w=800"),
        ("Mercedes-Benz", "C-Class", "C200 AMG", 2024, "Benzin", 1496, 204, "Sedan", 240, 7.3, "Otomatik", 7.1, 1640, 1438, 1820, "Arkadan İtiş", 455, Some(36), Some(3_200_000), "https://images.unsplash.com/photo-1618843479313-40f8afb4b4d8?w=800"),
        ("Volkswagen", "Golf", "1.5 TSI Highline", 2024, "Benzin", 1498, 150, "Hatchback", 220, 8.5, "Otomatik", 5.9, 1320, 1456, 1789, "Önden Çekiş", 380, Some(37), Some(1_450_000), "https://images.unsplash.com/photo-1552519507-da3b142c6e3d?w=800"),
        ("Renault", "Clio", "1.0 TCe Touch", 2023, "Benzin", 999, 90, "Hatchback", 180, 12.2, "Manuel", 5.4, 1178, 1440, 1798, "Önden Çekiş", 391, Some(38), Some(1_100_000), "https://images.unsplash.com/photo-1590362891991-f776e747a588?w=800"),
        ("Tesla", "Model 3", "Long Range", 2024, "Elektrik", 0, 498, "Sedan", 233, 4.4, "Otomatik", 0.0, 1844, 1443, 1849, "4x4", 425, Some(35), Some(2_100_000), "https://images.unsplash.com/photo-1560958089-b8a1929cea89?w=800"),
        ("Hyundai", "Tucson", "1.6 T-GDI Elite", 2024, "Hibrit", 1598, 230, "SUV", 193, 8.0, "Otomatik", 5.6, 1637, 1650, 1865, "4x4", 577, Some(37), Some(2_350_000), "https://images.unsplash.com/photo-1633859036670-a0a59f2f87e4?w=800"),
        ("Fiat", "Egea", "1.4 Fire Easy", 2023, "Benzin", 1368, 95, "Sedan", 185, 11.9, "Manuel", 6.0, 1205, 1485, 1792, "Önden Çekiş", 520, None, Some(950_000), "https://images.unsplash.com/photo-1617531653520-bd466ee81145?w=800"),
        ("Audi", "A4", "40 TFSI S line", 2024, "Benzin", 1984, 204, "Sedan", 241, 7.3, "Otomatik", 6.6, 1520, 1428, 1847, "4x4", 460, Some(36), Some(2_950_000), "https://images.unsplash.com/photo-1606664515524-ed2f786a0bd6?w=800"),
        ("Peugeot", "3008", "1.2 PureTech Allure", 2023, "Benzin", 1199, 130, "SUV", 188, 10.8, "Otomatik", 5.8, 1325, 1624, 1841, "Önden Çekiş", 520, None, None, "https://images.unsplash.com/photo-1619767886558-efdc259cde1a?w=800"),
    ];

    specs
        .into_iter()
        .map(
            |(make, model, pack, year, fuel, cc, hp, body, top, accel, trans, econ, weight, height, width, drive, baggage, brake, price, photo)| {
                CarCreate {
                    make: make.to_string(),
                    model: model.to_string(),
                    pack: pack.to_string(),
                    year,
                    fuel_type: fuel.to_string(),
                    engine_capacity: cc,
                    horse_power: hp,
                    body_type: body.to_string(),
                    top_speed: top,
                    acceleration: accel,
                    transmission: trans.to_string(),
                    economy: econ,
                    weight,
                    height,
                    width,
                    drive_train: drive.to_string(),
                    baggage_lt: baggage,
                    brake_metre: brake,
                    price,
                    photos: photo.to_string(),
                }
                .into_car()
            },
        )
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cars = CarRepository::new(pool.clone());
    let users = UserRepository::new(pool.clone());
    let auth = AuthService::new(&config.jwt_secret, config.token_expiry_minutes);

    let existing = cars.count().await?;
    if existing > 0 {
        tracing::info!("Database already has {} cars. Skipping catalog seed.", existing);
    } else {
        let catalog = sample_cars();
        for car in &catalog {
            cars.create(car).await?;
        }
        tracing::info!("Inserted {} cars", catalog.len());
    }

    let admin_email = "admin@aradakifark.com";
    if users.find_record_by_email(admin_email).await?.is_none() {
        let admin = UserRecord {
            user_id: Uuid::new_v4().to_string(),
            email: admin_email.to_string(),
            full_name: "Admin User".to_string(),
            role: Role::Admin,
            hashed_password: auth.hash_password("admin123")?,
            bio: None,
            location: None,
            profile_photo: None,
            kvkk_accepted: true,
            email_notifications: true,
            created_at: Utc::now(),
        };
        users.create(&admin).await?;
        tracing::info!("Admin user created: {}", admin_email);
    } else {
        tracing::info!("Admin user already exists");
    }

    tracing::info!("Seed completed successfully");
    Ok(())
}

use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use carcompare_api::auth::AuthService;
use carcompare_api::config::Config;
use carcompare_api::constants::API_NAME;
use carcompare_api::handlers::{admin, auth, cars, compare, favorites, health, reviews};
use carcompare_api::state::AppState;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("{} Starting car comparison API on port {}", API_NAME, config.server_port);

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("{} Connected to database", API_NAME);

    let auth_service = AuthService::new(&config.jwt_secret, config.token_expiry_minutes);
    let state = AppState::new(pool, auth_service);

    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Build application router
    let app = Router::new()
        .merge(health::router())
        .nest("/api", compare::router())
        .nest("/api/auth", auth::router())
        .nest("/api/cars", cars::router())
        .nest("/api/favorites", favorites::router())
        .nest("/api/reviews", reviews::router())
        .nest("/api/admin", admin::router())
        .layer(cors)
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("{} Server listening on {}", API_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use lodging_api::{app, AppState, AuthConfig, Repositories};
use lodging_store::{
    app_config::Config, DbClient, StoreBookingRepository, StoreEnrollmentRepository,
    StoreHotelRepository, StoreSessionRepository, StoreTicketRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "lodging_api=debug,lodging_core=debug,tower_http=debug,axum::rejection=trace".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Lodging API on port {}", config.server.port);

    let db = DbClient::new(&config.database)
        .await
        .context("Failed to connect to Postgres")?;
    if config.database.run_migrations {
        db.migrate().await.context("Failed to run migrations")?;
    }

    let repos = Repositories {
        enrollments: Arc::new(StoreEnrollmentRepository::new(db.pool.clone())),
        tickets: Arc::new(StoreTicketRepository::new(db.pool.clone())),
        hotels: Arc::new(StoreHotelRepository::new(db.pool.clone())),
        bookings: Arc::new(StoreBookingRepository::new(db.pool.clone())),
        sessions: Arc::new(StoreSessionRepository::new(db.pool.clone())),
    };

    let app_state = AppState::new(
        repos,
        AuthConfig { secret: config.auth.jwt_secret.clone().into() },
        config.cors.allowed_origins.clone(),
    );

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

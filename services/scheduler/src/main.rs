use anyhow::Result;
use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use tokio::net::TcpListener;
use tracing::info;

use scheduler::{
    AppState,
    config::SchedulerConfig,
    create_router,
    repositories::{PgSessionRepository, PgSportRepository},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    common::telemetry::init("scheduler", "info");

    info!("Starting scheduler service");

    let settings = SchedulerConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool).await?;

    let app_state = AppState::new(
        PgSessionRepository::new(pool.clone()),
        PgSportRepository::new(pool),
    );

    let app = create_router(app_state);

    let address = settings.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Scheduler service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Scheduler service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

use anyhow::Result;
use common::{
    cache::{RedisConfig, RedisPool},
    database::{DatabaseConfig, health_check, init_pool, run_migrations},
};
use tokio::net::TcpListener;
use tracing::{info, warn};

use identity::{
    AccountSettings, AppState, IdentityService,
    clock::SystemClock,
    codes::RedisCodeStore,
    config::{IdentityConfig, MailConfig},
    create_router,
    mailer::SmtpMailer,
    repositories::PgUserRepository,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    common::telemetry::init("identity", "info");

    info!("Starting identity service");

    let settings = IdentityConfig::from_env()?;
    let mail_config = MailConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool).await?;

    // Verification codes live in Redis
    let redis_config = RedisConfig::from_env()?;
    let redis_pool = RedisPool::new(&redis_config).await?;
    match redis_pool.health_check().await {
        Ok(true) => info!("Redis connection successful"),
        Ok(false) | Err(_) => warn!("Redis is not reachable yet, signups will fail until it is"),
    }

    let mailer = SmtpMailer::new(&mail_config)?;

    let identity = IdentityService::new(
        PgUserRepository::new(pool),
        RedisCodeStore::new(redis_pool),
        mailer,
        SystemClock,
        AccountSettings::from(&settings),
    );

    let app = create_router(AppState::new(identity));

    let address = settings.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Identity service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Identity service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

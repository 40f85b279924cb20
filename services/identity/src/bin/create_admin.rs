use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use common::database::{DatabaseConfig, init_pool, run_migrations};
use tracing::info;

use identity::{
    admin::{AdminProvision, provision_admin},
    repositories::PgUserRepository,
};

/// Create an administrator account, or promote an existing one
#[derive(Parser, Debug)]
#[command(name = "create-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Email of the admin account
    #[arg(long)]
    email: String,

    /// Display name, used when the account is created
    #[arg(long, default_value = "Administrator")]
    fullname: String,

    /// Password for a new account (ignored when promoting)
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    common::telemetry::init("create-admin", "info");

    let cli = Cli::parse();

    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    run_migrations(&pool).await?;

    let users = PgUserRepository::new(pool);
    let outcome =
        provision_admin(&users, &cli.fullname, &cli.email, &cli.password, Utc::now()).await?;

    match outcome {
        AdminProvision::Created => info!("Created admin: {}", cli.email),
        AdminProvision::Promoted => info!("Promoted {} to verified admin", cli.email),
        AdminProvision::Unchanged => info!("Admin already exists: {}", cli.email),
    }

    Ok(())
}

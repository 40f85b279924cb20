//! Integration tests for the infrastructure components
//!
//! These tests verify that the PostgreSQL database and Redis cache are
//! reachable and that the bundled migrations create the three collections.
//! They need live services, so they only run with `--ignored`.

use common::{
    cache::{RedisConfig, RedisPool},
    database::{DatabaseConfig, health_check, init_pool, run_migrations},
};
use sqlx::Row;

#[tokio::test]
#[ignore = "requires running PostgreSQL and Redis"]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    assert!(health_check(&pool).await?, "Database health check failed");

    run_migrations(&pool).await?;

    for table in ["users", "sports", "sessions"] {
        let row = sqlx::query("SELECT to_regclass($1)::text AS name")
            .bind(table)
            .fetch_one(&pool)
            .await?;
        let name: Option<String> = row.get("name");
        assert_eq!(name.as_deref(), Some(table), "missing table {}", table);
    }

    let redis_pool = RedisPool::new(&RedisConfig::from_env()?).await?;
    assert!(
        redis_pool.health_check().await?,
        "Redis health check failed"
    );

    let key = redis_pool.key("integration", "ping");
    redis_pool.set(&key, "ok", Some(10)).await?;
    assert_eq!(redis_pool.get(&key).await?, Some("ok".to_string()));

    redis_pool.delete(&key).await?;
    assert_eq!(redis_pool.get(&key).await?, None);

    Ok(())
}

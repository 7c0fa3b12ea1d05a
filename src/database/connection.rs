//! Postgres pool for the list store

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::utils::errors::{GeneraListError, Result};

pub type DatabasePool = Pool<Postgres>;

/// Pool sizing and timeouts
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/generalist".to_string(),
            max_connections: 10,
            min_connections: 1,
            // A turn has to answer within the platform's deadline
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Some(Duration::from_secs(600)),
        }
    }
}

impl From<&DatabaseConfig> for PoolConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections,
            min_connections: config.min_connections,
            ..Self::default()
        }
    }
}

/// Connect and verify the pool answers a query
pub async fn create_pool(config: &PoolConfig) -> Result<DatabasePool> {
    debug!(url = %redact_url(&config.url), max = config.max_connections, "Connecting to Postgres");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .connect(&config.url)
        .await?;

    ping(&pool).await?;
    info!(url = %redact_url(&config.url), "List database ready");
    Ok(pool)
}

/// Apply the embedded migrations in `migrations/`
pub async fn run_migrations(pool: &DatabasePool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("List table migrations applied");
    Ok(())
}

/// Round trip to the server
pub async fn ping(pool: &DatabasePool) -> Result<()> {
    let (one,): (i32,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;
    if one != 1 {
        return Err(GeneraListError::StoreUnavailable("database ping returned garbage".to_string()));
    }
    Ok(())
}

/// Connection string with the password masked, for logs
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.split_once('@') {
        Some((credentials, host)) => {
            let user = credentials.split(':').next().unwrap_or_default();
            format!("{}://{}:***@{}", scheme, user, host)
        }
        None => url.to_string(),
    }
}

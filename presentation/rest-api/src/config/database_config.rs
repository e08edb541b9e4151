use std::env;

use anyhow::{Context, bail};
use persistence::db::{DatabaseConfig, create_postgres_pool};
use sqlx::PgPool;

/// Which `FranchiseGateway` adapter backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => bail!("unsupported STORAGE_BACKEND '{other}', expected 'postgres' or 'memory'"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub max_connections: u32,
    pub migrations_path: String,
}

impl StorageConfig {
    /// Load storage settings from environment variables
    ///
    /// Environment variables:
    /// - STORAGE_BACKEND: "postgres" or "memory" (default: "postgres")
    /// - DATABASE_MAX_CONNECTIONS: pool size (default: 5)
    /// - MIGRATIONS_PATH: directory with SQL migrations (default: "./migrations")
    pub fn from_env() -> anyhow::Result<Self> {
        let backend = env::var("STORAGE_BACKEND").unwrap_or_else(|_| "postgres".to_string());
        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))?,
            Err(_) => 5,
        };

        Ok(Self {
            backend: StorageBackend::parse(&backend)?,
            max_connections,
            migrations_path: env::var("MIGRATIONS_PATH")
                .unwrap_or_else(|_| "./migrations".to_string()),
        })
    }
}

/// Initialize database connection pool from environment variables
///
/// Environment variables:
/// - DATABASE_URL: PostgreSQL connection string (required)
///
/// # Errors
/// Returns error if DATABASE_URL is not set or connection fails
pub async fn init_database(config: &StorageConfig) -> anyhow::Result<PgPool> {
    let db_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = create_postgres_pool(
        &DatabaseConfig::new(db_url).with_max_connections(config.max_connections),
    )
    .await?;
    Ok(pool)
}

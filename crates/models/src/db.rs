use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

pub use configs::DatabaseConfig;

/// Translate the pool settings into SeaORM options.
pub fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    opts
}

/// Validate `cfg`, then open a pool. Invalid settings fail before any I/O.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    cfg.validate()?;
    tracing::debug!(
        max_connections = cfg.max_connections,
        min_connections = cfg.min_connections,
        "connecting to database"
    );
    let db = Database::connect(connect_options(cfg)).await?;
    Ok(db)
}

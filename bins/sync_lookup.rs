use std::io;

use dotenvy::dotenv;
use tracing::{error, info};

use configs::{AppConfig, LogFormat};
use service::sync::{SeaOrmSyncRecordRepository, SyncRecordRepository};

const USAGE: &str = "usage: sync-lookup <store_id>";

// stdout carries the JSON result; logs go to stderr.
fn init_logging(cfg: &AppConfig) {
    let fallback = cfg.logging.filter.as_deref();
    match cfg.logging.format {
        LogFormat::Compact => common::init_logging_compact_to(fallback, io::stderr),
        LogFormat::Json => common::init_logging_json_to(fallback, io::stderr),
    }
}

/// Store id from the first argument after the program name.
fn parse_store_id<I>(args: I) -> anyhow::Result<i64>
where
    I: IntoIterator<Item = String>,
{
    let arg = args
        .into_iter()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!(USAGE))?;
    arg.trim()
        .parse::<i64>()
        .map_err(|e| anyhow::anyhow!("invalid store id {arg:?}: {e}\n{USAGE}"))
}

async fn run(cfg: AppConfig, store_id: i64) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    let repo = SeaOrmSyncRecordRepository::new(db);
    let found = repo.find_by_store(store_id).await?;
    info!(store_id, found = found.is_some(), "lookup finished");
    println!("{}", serde_json::to_string_pretty(&found)?);
    Ok(())
}

fn main() -> std::process::ExitCode {
    let store_id = match parse_store_id(std::env::args()) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("{e}");
            return std::process::ExitCode::from(2);
        }
    };

    // .env first so RUST_LOG and DATABASE_URL apply
    dotenv().ok();

    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::init_logging_compact_to(None, io::stderr);
            error!(service = "sync-lookup", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    init_logging(&cfg);

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "sync-lookup", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    rt.block_on(async move {
        tokio::select! {
            res = run(cfg, store_id) => match res {
                Ok(()) => std::process::ExitCode::SUCCESS,
                Err(e) => {
                    error!(service = "sync-lookup", event = "lookup_failed", store_id, error = %e, "lookup failed");
                    std::process::ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "sync-lookup", event = "shutdown_signal", "interrupted");
                std::process::ExitCode::FAILURE
            }
        }
    })
}

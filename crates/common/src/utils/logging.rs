use std::io;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

/// Default directives when `RUST_LOG` is unset.
/// SeaORM and sqlx log every statement at info; keep them at warn.
pub const DEFAULT_FILTER: &str = "info,sea_orm=warn,sqlx=warn";

/// `RUST_LOG` if set, else `fallback`, else [`DEFAULT_FILTER`].
pub fn env_filter(fallback: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback.unwrap_or(DEFAULT_FILTER)))
}

/// Compact human-readable subscriber writing to `writer`.
pub fn compact_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(writer)
        .finish()
}

/// JSON subscriber writing to `writer`.
pub fn json_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .with_writer(writer)
        .finish()
}

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to [`DEFAULT_FILTER`]
/// - Writes to stdout to improve visibility in environments that hide stderr
pub fn init_logging_default() {
    init_logging_compact(None);
}

/// Compact output on stdout with an optional fallback filter.
pub fn init_logging_compact(fallback: Option<&str>) {
    init_logging_compact_to(fallback, io::stdout);
}

/// JSON output on stdout with an optional fallback filter.
pub fn init_logging_json(fallback: Option<&str>) {
    init_logging_json_to(fallback, io::stdout);
}

/// Compact output on a chosen writer. CLIs whose stdout is data pass `io::stderr`.
pub fn init_logging_compact_to<W>(fallback: Option<&str>, writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let _ = tracing::subscriber::set_global_default(compact_subscriber(env_filter(fallback), writer));
}

/// JSON output on a chosen writer.
pub fn init_logging_json_to<W>(fallback: Option<&str>, writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let _ = tracing::subscriber::set_global_default(json_subscriber(env_filter(fallback), writer));
}

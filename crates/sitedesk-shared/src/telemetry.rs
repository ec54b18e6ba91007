//! Telemetry setup for the SiteDesk server.
//!
//! JSON-formatted tracing with an env-filter override; without `RUST_LOG`
//! the server logs at `info` and sqlx statement logging stays at `warn` so
//! per-query noise does not drown the request log.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_telemetry() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx::query=warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json())
        .init();
}

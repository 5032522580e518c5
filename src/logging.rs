//! Tracing setup: ANSI output on stdout plus a plain-text copy in
//! `$LOG_DIR/daybook.log` (default `./logs`).
//!
//! `RUST_LOG` overrides the filter, e.g. `RUST_LOG=daybook=debug,sqlx=info`.

use std::env;
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,sqlx=warn,hyper=warn,tower=warn,h2=warn";
const LOG_FILE: &str = "daybook.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Keep the guard alive until exit or the
/// file writer drops whatever it still buffers.
pub fn init() -> WorkerGuard {
    let dir = env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string());
    let (file_writer, guard) = non_blocking(tracing_appender::rolling::never(dir, LOG_FILE));

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    guard
}

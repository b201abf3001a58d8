// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod config;
pub mod metrics;
pub mod notify;
pub mod table;
pub mod topsis;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::config::AppConfig;
pub use crate::table::{DecisionTable, RankedRow, RankedTable};
pub use crate::topsis::{evaluate, evaluate_csv, Impact, TopsisError};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Build the full HTTP app from configuration (mailer chosen by `config.email`).
pub fn app(config: AppConfig) -> anyhow::Result<axum::Router> {
    let state = AppState::from_config(config)?;
    Ok(router(state))
}

/// Install a tracing subscriber once. `RUST_LOG` controls the filter;
/// `LOG_FORMAT=json` switches to JSON lines. Safe to call repeatedly.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
}

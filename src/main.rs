//! TOPSIS mailer binary entrypoint.
//! Boots the Axum HTTP server with configuration read from the environment.

use anyhow::Context;
use shuttle_axum::ShuttleAxum;
use topsis_mailer::{app, init_tracing, AppConfig};

/// Compact local logs only when `TOPSIS_DEV_LOG=1`; the Shuttle runtime
/// installs its own subscriber otherwise.
fn enable_dev_tracing() {
    let dev_flag = std::env::var("TOPSIS_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");
    if dev_flag {
        init_tracing("topsis_mailer=debug,info");
    }
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op when the file is absent.
    let _ = dotenvy::dotenv();
    enable_dev_tracing();

    let config = AppConfig::from_env().context("loading configuration")?;
    tracing::info!(
        email = config.email.backend.name(),
        max_upload_bytes = config.max_upload_bytes,
        metrics = config.metrics_enabled,
        "starting topsis-mailer"
    );
    if !config.email.is_enabled() {
        tracing::warn!("no email backend configured; form uploads will fail at delivery");
    }

    let router = app(config)?;
    Ok(router.into())
}

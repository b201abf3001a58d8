use anyhow::{Context, Result};
use axum::{routing::get, Router};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::topsis::ErrorKind;

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

impl Metrics {
    /// Install the Prometheus recorder (at most once per process) and
    /// publish the upload limit as a static gauge.
    pub fn init(max_upload_bytes: usize) -> Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| {
                let handle = PrometheusBuilder::new()
                    .install_recorder()
                    .context("prometheus: install recorder")?;
                describe();
                Ok::<_, anyhow::Error>(handle)
            })?
            .clone();

        gauge!("topsis_max_upload_bytes").set(max_upload_bytes as f64);
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router<S>(&self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

fn describe() {
    describe_counter!("topsis_runs_total", "Engine invocations that produced a ranking.");
    describe_counter!(
        "topsis_failures_total",
        "Engine invocations rejected, labelled by error kind."
    );
    describe_counter!(
        "topsis_deliveries_total",
        "Result deliveries, labelled by outcome."
    );
    describe_histogram!("topsis_duration_ms", "Engine wall time in milliseconds.");
    describe_gauge!("topsis_max_upload_bytes", "Configured request body limit.");
}

// Recording is a no-op until a recorder is installed.

pub fn record_run(duration_ms: f64) {
    counter!("topsis_runs_total").increment(1);
    histogram!("topsis_duration_ms").record(duration_ms);
}

pub fn record_failure(kind: ErrorKind) {
    counter!("topsis_failures_total", "kind" => kind.as_str()).increment(1);
}

pub fn record_delivery(ok: bool) {
    let outcome = if ok { "sent" } else { "failed" };
    counter!("topsis_deliveries_total", "outcome" => outcome).increment(1);
}

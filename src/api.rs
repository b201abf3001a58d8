// src/api.rs
//! HTTP surface: the upload form flow (rank, then email the result) and a
//! JSON endpoint that returns the ranking directly.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::metrics::{self, Metrics};
use crate::notify::{is_valid_email, mailer_from_config, ResultAttachment, ResultMailer};
use crate::table::RankedTable;
use crate::topsis::{self, TopsisError};

pub const MSG_NO_FILE: &str = "No file selected";
pub const MSG_NO_WEIGHTS: &str = "Please enter weights";
pub const MSG_NO_IMPACTS: &str = "Please enter impacts";
pub const MSG_BAD_EMAIL: &str = "Please enter a valid email address";
pub const MSG_NOT_CSV: &str = "Please upload a CSV file";
pub const MSG_SENT: &str = "Results sent to your email successfully!";
pub const MSG_DELIVERY_FAILED: &str = "Error sending email. Please check email configuration.";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub mailer: Arc<dyn ResultMailer>,
}

impl AppState {
    pub fn new(config: AppConfig, mailer: Arc<dyn ResultMailer>) -> Self {
        Self {
            config: Arc::new(config),
            mailer,
        }
    }

    /// Build the mailer the config asks for.
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let mailer = mailer_from_config(&config.email)?;
        Ok(Self::new(config, mailer))
    }
}

pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/topsis", post(submit))
        .route("/topsis/rank", post(rank_json));

    if state.config.metrics_enabled {
        match Metrics::init(state.config.max_upload_bytes) {
            Ok(m) => app = app.merge(m.router::<AppState>()),
            Err(e) => warn!(error = ?e, "metrics disabled"),
        }
    }

    app.layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed form input, rejected before the engine runs.
    Form(&'static str),
    Upload(MultipartError),
    Topsis(TopsisError),
    Delivery,
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    kind: &'a str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::Form(msg) => (StatusCode::BAD_REQUEST, "invalid_form", msg.to_string()),
            ApiError::Upload(e) => (e.status(), "upload", e.body_text()),
            ApiError::Topsis(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                e.kind().as_str(),
                e.to_string(),
            ),
            ApiError::Delivery => (
                StatusCode::BAD_GATEWAY,
                "delivery",
                MSG_DELIVERY_FAILED.to_string(),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
        };
        (
            status,
            Json(ErrorBody {
                error: ErrorDetail { kind, message },
            }),
        )
            .into_response()
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::Upload(e)
    }
}

/// Run the engine off the async runtime and record the outcome.
async fn run_engine(csv: Vec<u8>, weights: String, impacts: String) -> Result<RankedTable, ApiError> {
    let (result, elapsed_ms) = tokio::task::spawn_blocking(move || {
        let started = Instant::now();
        let r = topsis::evaluate_csv(&csv, &weights, &impacts);
        (r, started.elapsed().as_secs_f64() * 1000.0)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("engine task failed: {e}")))?;

    match result {
        Ok(table) => {
            metrics::record_run(elapsed_ms);
            info!(alternatives = table.len(), elapsed_ms, "ranking computed");
            Ok(table)
        }
        Err(e) => {
            metrics::record_failure(e.kind());
            if e.is_data_error() {
                warn!(kind = e.kind().as_str(), error = %e, "ranking failed on numeric data");
            } else {
                info!(kind = e.kind().as_str(), error = %e, "ranking rejected");
            }
            Err(ApiError::Topsis(e))
        }
    }
}

fn csv_bytes(table: &RankedTable) -> Result<Vec<u8>, ApiError> {
    table
        .to_csv_bytes()
        .map_err(|e| ApiError::Internal(format!("writing result csv: {e}")))
}

// ---- POST /topsis (multipart form) ----

#[derive(Debug, Default)]
struct UploadForm {
    file_name: Option<String>,
    file: Option<Vec<u8>>,
    weights: String,
    impacts: String,
    email: String,
}

async fn read_form(multipart: &mut Multipart) -> Result<UploadForm, MultipartError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                form.file_name = field.file_name().map(str::to_string);
                form.file = Some(field.bytes().await?.to_vec());
            }
            "weights" => form.weights = field.text().await?,
            "impacts" => form.impacts = field.text().await?,
            "email" => form.email = field.text().await?,
            _ => {}
        }
    }
    Ok(form)
}

/// First failing check wins; messages are shown to the user verbatim.
fn check_form(form: UploadForm) -> Result<(Vec<u8>, String, String, String), ApiError> {
    let (Some(file), Some(name)) = (form.file, form.file_name) else {
        return Err(ApiError::Form(MSG_NO_FILE));
    };
    if name.is_empty() {
        return Err(ApiError::Form(MSG_NO_FILE));
    }
    if form.weights.trim().is_empty() {
        return Err(ApiError::Form(MSG_NO_WEIGHTS));
    }
    if form.impacts.trim().is_empty() {
        return Err(ApiError::Form(MSG_NO_IMPACTS));
    }
    let email = form.email.trim().to_string();
    if !is_valid_email(&email) {
        return Err(ApiError::Form(MSG_BAD_EMAIL));
    }
    if !name.ends_with(".csv") {
        return Err(ApiError::Form(MSG_NOT_CSV));
    }
    Ok((file, form.weights, form.impacts, email))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub status: String,
    pub message: String,
    pub alternatives: usize,
    pub delivery_id: Option<String>,
}

async fn submit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SubmitResponse>, ApiError> {
    let form = read_form(&mut multipart).await?;
    let (file, weights, impacts, email) = check_form(form)?;

    let table = run_engine(file, weights, impacts).await?;
    let attachment = ResultAttachment::csv(csv_bytes(&table)?);

    match state.mailer.send_result(&email, &attachment).await {
        Ok(receipt) => {
            metrics::record_delivery(true);
            Ok(Json(SubmitResponse {
                status: "sent".to_string(),
                message: MSG_SENT.to_string(),
                alternatives: table.len(),
                delivery_id: receipt.id,
            }))
        }
        Err(e) => {
            metrics::record_delivery(false);
            warn!(backend = state.mailer.name(), error = ?e, "result delivery failed");
            Err(ApiError::Delivery)
        }
    }
}

// ---- POST /topsis/rank (JSON) ----

#[derive(Debug, Serialize, Deserialize)]
pub struct RankRequest {
    pub csv: String,
    pub weights: String,
    pub impacts: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RankedRowOut {
    pub alternative: String,
    pub values: Vec<String>,
    /// Rounded to 2 decimals, as in the CSV.
    pub score: f64,
    pub rank: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RankResponse {
    pub columns: Vec<String>,
    pub rows: Vec<RankedRowOut>,
    pub csv: String,
}

async fn rank_json(Json(req): Json<RankRequest>) -> Result<Json<RankResponse>, ApiError> {
    let table = run_engine(req.csv.into_bytes(), req.weights, req.impacts).await?;
    let csv = String::from_utf8(csv_bytes(&table)?)
        .map_err(|e| ApiError::Internal(format!("result csv is not utf-8: {e}")))?;

    let rows = table
        .rows
        .iter()
        .map(|r| RankedRowOut {
            alternative: r.alternative().to_string(),
            values: r.cells.iter().skip(1).cloned().collect(),
            score: r.rounded_score(),
            rank: r.rank,
        })
        .collect();

    Ok(Json(RankResponse {
        columns: table.output_headers(),
        rows,
        csv,
    }))
}

use adopt_match::config::AppConfig;
use adopt_match::error::AppError;
use adopt_match::telemetry;
use adopt_match::workflows::adoption::questionnaire::{self, ResponseSubmission};
use adopt_match::workflows::adoption::report::{
    document, FileSystemSink, ReportFormat, ReportGenerator, ReportSink,
};
use adopt_match::workflows::adoption::{
    find_matches, load_dogs, load_dogs_from_path, load_shelters, load_shelters_from_path,
    AdoptionMatch,
};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Adoption Match Service",
    about = "Match rescue dogs to shelter acceptance criteria and export adoption reports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run the adoption matching workflow from the command line
    Adoption {
        #[command(subcommand)]
        command: AdoptionCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum AdoptionCommand {
    /// Match the rosters and export an adoption report
    Report(AdoptionReportArgs),
}

#[derive(Args, Debug)]
struct AdoptionReportArgs {
    /// Dog roster CSV
    #[arg(long)]
    dogs_csv: PathBuf,
    /// Shelter acceptance roster CSV
    #[arg(long)]
    shelters_csv: PathBuf,
    /// Optional questionnaire submissions (JSON array keyed by match index)
    #[arg(long)]
    responses: Option<PathBuf>,
    /// Export format
    #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
    format: ReportFormat,
    /// Output directory (defaults to APP_EXPORT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Report date stamp (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    generated_on: Option<NaiveDate>,
    /// Print a text preview of the paginated document to stdout
    #[arg(long)]
    preview: bool,
}

#[derive(Debug, Deserialize)]
struct AdoptionMatchRequest {
    dogs_csv: String,
    shelters_csv: String,
}

#[derive(Debug, Serialize)]
struct AdoptionMatchResponse {
    dog_count: usize,
    shelter_count: usize,
    matched_dogs: usize,
    matches: Vec<AdoptionMatch>,
}

#[derive(Debug, Deserialize)]
struct AdoptionReportRequest {
    dogs_csv: String,
    shelters_csv: String,
    #[serde(default)]
    submissions: Vec<ResponseSubmission>,
    #[serde(default = "default_report_format")]
    format: ReportFormat,
    #[serde(default)]
    generated_on: Option<NaiveDate>,
}

fn default_report_format() -> ReportFormat {
    ReportFormat::Csv
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Adoption {
            command: AdoptionCommand::Report(args),
        } => run_adoption_report(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = app_router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "adoption match service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/adoption/match", post(adoption_match_endpoint))
        .route("/api/v1/adoption/report", post(adoption_report_endpoint))
        .with_state(state)
}

fn run_adoption_report(args: AdoptionReportArgs) -> Result<(), AppError> {
    let AdoptionReportArgs {
        dogs_csv,
        shelters_csv,
        responses,
        format,
        output_dir,
        generated_on,
        preview,
    } = args;

    let config = AppConfig::load()?;

    let dogs = load_dogs_from_path(dogs_csv)?;
    let shelters = load_shelters_from_path(shelters_csv)?;
    let mut matches = find_matches(&dogs, &shelters);
    println!(
        "Matched {} of {} dogs against {} shelters",
        matches.len(),
        dogs.len(),
        shelters.len()
    );

    if let Some(path) = responses {
        let raw = std::fs::read_to_string(path)?;
        let submissions: Vec<ResponseSubmission> = serde_json::from_str(&raw).map_err(|err| {
            AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
        })?;
        questionnaire::apply_submissions(&mut matches, submissions)?;
    }

    let generated_on = generated_on.unwrap_or_else(|| Local::now().date_naive());
    let generator = ReportGenerator::with_default_backends();
    let artifact = generator.render(&matches, format, generated_on)?;

    let sink = FileSystemSink::new(output_dir.unwrap_or(config.reports.export_dir));
    let path = sink.publish(&artifact)?;
    println!("Report written to {}", path.display());

    if preview {
        let doc = document::build(&matches, generated_on)?;
        println!("\n{}", document::render_text(&doc));
    }

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn adoption_match_endpoint(
    Json(payload): Json<AdoptionMatchRequest>,
) -> Result<Json<AdoptionMatchResponse>, AppError> {
    let dogs = load_dogs(Cursor::new(payload.dogs_csv.into_bytes()))?;
    let shelters = load_shelters(Cursor::new(payload.shelters_csv.into_bytes()))?;
    let matches = find_matches(&dogs, &shelters);

    Ok(Json(AdoptionMatchResponse {
        dog_count: dogs.len(),
        shelter_count: shelters.len(),
        matched_dogs: matches.len(),
        matches,
    }))
}

async fn adoption_report_endpoint(
    Json(payload): Json<AdoptionReportRequest>,
) -> Result<Response, AppError> {
    let AdoptionReportRequest {
        dogs_csv,
        shelters_csv,
        submissions,
        format,
        generated_on,
    } = payload;

    let dogs = load_dogs(Cursor::new(dogs_csv.into_bytes()))?;
    let shelters = load_shelters(Cursor::new(shelters_csv.into_bytes()))?;
    let mut matches = find_matches(&dogs, &shelters);
    questionnaire::apply_submissions(&mut matches, submissions)?;

    let generated_on = generated_on.unwrap_or_else(|| Local::now().date_naive());
    let generator = ReportGenerator::with_default_backends();
    let artifact = generator.render(&matches, format, generated_on)?;

    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}

mod demo;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use customer_intake::config::AppConfig;
use customer_intake::error::AppError;
use customer_intake::telemetry;
use customer_intake::workflows::onboarding::{
    batch, onboarding_router, BatchIntakeError, CompanyId, CreditPolicy, NewCustomerRequest,
    OnboardingService,
};
use demo::{FixedLimitBureau, InMemoryCompanyDirectory, InMemoryCustomerStore};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
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
    name = "Customer Intake Service",
    about = "Onboard prospective customers through validation, credit screening, and persistence",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP intake service (default command)
    Serve(ServeArgs),
    /// Run the onboarding pipeline from the command line
    Onboard {
        #[command(subcommand)]
        command: OnboardCommand,
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
    /// Limit reported by the demo bureau backing the server wiring
    #[arg(long, default_value_t = 600)]
    bureau_limit: i64,
}

#[derive(Subcommand, Debug)]
enum OnboardCommand {
    /// Onboard a single customer supplied via flags
    Single(SingleArgs),
    /// Replay a customer CSV export through the pipeline
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct SingleArgs {
    #[arg(long)]
    firstname: String,
    #[arg(long)]
    surname: String,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    date_of_birth: NaiveDate,
    #[arg(long)]
    email: String,
    #[arg(long)]
    company_id: i64,
    /// Limit reported by the demo bureau
    #[arg(long, default_value_t = 600)]
    bureau_limit: i64,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Customer CSV export (Firstname,Surname,Date Of Birth,Email,Company Id)
    #[arg(long)]
    csv: PathBuf,
    /// Limit reported by the demo bureau
    #[arg(long, default_value_t = 600)]
    bureau_limit: i64,
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
        Command::Onboard {
            command: OnboardCommand::Single(args),
        } => run_single(args),
        Command::Onboard {
            command: OnboardCommand::Batch(args),
        } => run_batch(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn build_service(
    bureau_limit: i64,
) -> (
    OnboardingService<InMemoryCompanyDirectory, InMemoryCustomerStore>,
    Arc<InMemoryCustomerStore>,
) {
    let companies = Arc::new(InMemoryCompanyDirectory::seeded());
    let customers = Arc::new(InMemoryCustomerStore::default());
    let bureau = Arc::new(FixedLimitBureau::new(bureau_limit));
    let service = OnboardingService::new(
        companies,
        customers.clone(),
        bureau,
        CreditPolicy::default(),
    );
    (service, customers)
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

    let (service, _customers) = build_service(args.bureau_limit);

    let ops = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state);

    let app = ops
        .merge(onboarding_router(Arc::new(service)))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "customer intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_single(args: SingleArgs) -> Result<(), AppError> {
    let SingleArgs {
        firstname,
        surname,
        date_of_birth,
        email,
        company_id,
        bureau_limit,
    } = args;

    let (service, customers) = build_service(bureau_limit);
    let request = NewCustomerRequest {
        firstname,
        surname,
        date_of_birth,
        email_address: email,
        company_id: CompanyId(company_id),
    };

    let accepted = service
        .add_customer(request)
        .map_err(BatchIntakeError::Onboarding)?;

    render_single_outcome(accepted, &customers);
    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs { csv, bureau_limit } = args;

    let (service, customers) = build_service(bureau_limit);
    let requests = batch::requests_from_path(csv)?;
    let outcomes = batch::onboard_all(&service, requests)?;

    println!("Batch intake results");
    for outcome in &outcomes {
        let verdict = if outcome.accepted {
            "accepted"
        } else {
            "rejected"
        };
        println!("- row {}: {} {}", outcome.row, outcome.applicant, verdict);
    }

    let accepted = customers.accepted();
    println!(
        "\n{} of {} customers onboarded",
        accepted.len(),
        outcomes.len()
    );

    Ok(())
}

fn render_single_outcome(accepted: bool, customers: &InMemoryCustomerStore) {
    if accepted {
        println!("Customer accepted and persisted");
        for customer in customers.accepted() {
            if customer.has_credit_limit {
                println!(
                    "- {} {} ({}): credit limit {}",
                    customer.firstname, customer.surname, customer.company.name, customer.credit_limit
                );
            } else {
                println!(
                    "- {} {} ({}): credit check skipped",
                    customer.firstname, customer.surname, customer.company.name
                );
            }
        }
    } else {
        println!("Customer rejected (validation or credit rule)");
    }
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

//! SwasthyaSetu - API Server Binary
//!
//! This binary starts the HTTP gateway for the claims, terminology, allergy
//! and assessment services.
//!
//! # Usage
//!
//! ```bash
//! # Run against PostgreSQL
//! API_DATABASE_URL=postgres://... cargo run --bin swasthyasetu-api
//!
//! # Run on the built-in reference catalog, no database
//! API_CATALOG_SOURCE=memory cargo run --bin swasthyasetu-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8000)
//! * `API_DATABASE_URL` / `DATABASE_URL` - PostgreSQL connection string
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_CATALOG_SOURCE` - `postgres` or `memory` (default: postgres)
//! * `API_MAPPINGS_CSV_PATH` - AYUSH to WHO mappings CSV
//! * `API_RXNAV_BASE_URL`, `API_PUBMED_BASE_URL` - Upstream base URLs
//! * `API_HTTP_TIMEOUT_SECS`, `API_HTTP_RETRIES`, `API_HTTP_RETRY_BACKOFF_MS` - Upstream call policy
//! * `API_LLM_BASE_URL`, `API_LLM_MODEL`, `API_LLM_API_KEY` - Optional narrative advisor

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_allergy::{AllergyMapperService, HerbStorePort, InMemoryHerbStore};
use domain_assessment::AssessmentService;
use domain_claims::{CatalogPort, ClaimAuditPort, ClaimValidationService, InMemoryAuditLog, InMemoryCatalog};
use domain_terminology::{MappingTable, TerminologyService};
use infra_db::adapters::{PostgresAuditLog, PostgresCatalogAdapter, PostgresHerbStore};
use infra_db::{create_pool, run_migrations, DatabaseConfig};
use infra_http::{GeminiAdvisor, PubMedAdapter, RxNavAdapter};
use interface_api::config::{ApiConfig, CatalogSource};
use interface_api::{create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, wires the adapters and starts
/// the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - The database is selected but cannot be reached or migrated
/// - An upstream HTTP client cannot be built
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        catalog = ?config.catalog_source,
        "Starting SwasthyaSetu API Server"
    );

    let state = build_state(&config).await?;
    let app = create_router(state);

    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to reading each variable on its own when the layered load
/// fails, e.g. on a malformed number.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Configuration error ({}), falling back to individual variables", e);
        ApiConfig::from_individual_vars()
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Constructs every adapter and service named by the configuration.
async fn build_state(config: &ApiConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    let (catalog, audit, herbs): (Arc<dyn CatalogPort>, Arc<dyn ClaimAuditPort>, Arc<dyn HerbStorePort>) =
        match config.catalog_source {
            CatalogSource::Postgres => {
                tracing::info!("Connecting to database...");
                let pool = create_pool(DatabaseConfig::new(&config.database_url)).await?;
                run_migrations(&pool).await?;
                tracing::info!("Database ready");
                (
                    Arc::new(PostgresCatalogAdapter::new(pool.clone())),
                    Arc::new(PostgresAuditLog::new(pool.clone())),
                    Arc::new(PostgresHerbStore::new(pool)),
                )
            }
            CatalogSource::Memory => {
                tracing::warn!("Using the in-memory reference catalog; audit entries are not persisted");
                (
                    Arc::new(InMemoryCatalog::reference()),
                    Arc::new(InMemoryAuditLog::new()),
                    Arc::new(InMemoryHerbStore::reference()),
                )
            }
        };

    let mappings = MappingTable::load_csv(&config.mappings_csv_path).unwrap_or_else(|e| {
        tracing::warn!(
            path = %config.mappings_csv_path,
            error = %e,
            "Mapping table not loaded; terminology search will answer 503"
        );
        MappingTable::default()
    });

    let upstream = config.upstream_config();
    let normalizer = Arc::new(RxNavAdapter::new(&config.rxnav_base_url, upstream)?);
    let literature = Arc::new(PubMedAdapter::new(&config.pubmed_base_url, upstream)?);

    let mut assessment = AssessmentService::new();
    match config.llm_key() {
        Some(key) => {
            let advisor = GeminiAdvisor::new(&config.llm_base_url, &config.llm_model, key, upstream)?;
            tracing::info!(model = %config.llm_model, "Treatment advisor enabled");
            assessment = assessment.with_advisor(Arc::new(advisor));
        }
        None => tracing::info!("No LLM key configured; assessments use rules only"),
    }

    Ok(AppState::new(
        ClaimValidationService::new(catalog).with_audit(audit),
        TerminologyService::new(Arc::new(mappings)),
        AllergyMapperService::new(normalizer, literature, herbs),
        assessment,
    ))
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

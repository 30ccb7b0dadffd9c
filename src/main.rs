//! Shortlist HTTP server and catalog ingestion entrypoint.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use shortlist::catalog::{CatalogIngestor, IngestReport, VectorCatalog, load_catalog};
use shortlist::config::Config;
use shortlist::embedding::TextEmbedder;
use shortlist::gateway::{AppState, create_router_with_state};
use shortlist::recommend::Recommender;
use shortlist::rerank::{GenaiModel, Reranker};
use shortlist::retrieval::CandidateRetriever;
use shortlist::vectordb::QdrantClient;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Assessment recommendation service.
#[derive(Parser)]
#[command(name = "shortlist")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Load a JSON catalog file into the vector collection.
    Ingest {
        /// JSON array of raw catalog entries.
        file: PathBuf,

        /// Drop the collection before loading.
        #[arg(long)]
        recreate: bool,
    },

    /// Probe the local `/health` endpoint; exits 0 when healthy.
    HealthCheck,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Command::HealthCheck)) {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Ingest { file, recreate } => {
            let report = ingest(&config, &file, recreate).await?;
            tracing::info!(
                ingested = report.ingested,
                skipped = report.skipped,
                "Ingestion finished"
            );
            Ok(())
        }
        Command::HealthCheck => Ok(()),
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        collection = %config.collection,
        model = %config.llm_model,
        "Shortlist starting"
    );

    let embedder = TextEmbedder::load(config.embedding_config())?;
    if embedder.is_stub() {
        tracing::warn!("No SHORTLIST_EMBEDDING_API_BASE configured, running embedder in stub mode");
    }

    let qdrant = QdrantClient::new(&config.qdrant_url).await?;
    if let Err(e) = qdrant.health_check().await {
        // Requests still succeed with empty results while the store is down.
        tracing::warn!(error = %e, "Qdrant not reachable at startup");
    }

    let catalog = VectorCatalog::new(embedder, qdrant, config.collection.clone());
    let model = GenaiModel::from_model(config.llm_model.clone());
    let reranker = Reranker::new(model, config.reranker_config())?;
    let recommender = Recommender::from_parts(
        CandidateRetriever::new(catalog),
        reranker,
        config.retrieval_k,
    );

    let app = create_router_with_state(AppState::new(recommender));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shortlist shutdown complete");
    Ok(())
}

async fn ingest(config: &Config, file: &Path, recreate: bool) -> anyhow::Result<IngestReport> {
    let loaded = load_catalog(file)?;
    tracing::info!(
        path = %file.display(),
        records = loaded.records.len(),
        skipped = loaded.skipped,
        "Catalog file loaded"
    );

    let embedder = TextEmbedder::load(config.embedding_config())?;
    let qdrant = QdrantClient::new(&config.qdrant_url).await?;
    qdrant.health_check().await?;

    let ingested = CatalogIngestor::new(&embedder, &qdrant, &config.collection)
        .ingest(&loaded.records, recreate)
        .await?;

    Ok(IngestReport {
        ingested,
        skipped: loaded.skipped,
    })
}

async fn run_health_check() -> i32 {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(_) => return 1,
    };
    let url = format!("http://127.0.0.1:{}/health", config.port);

    let Ok(client) = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    else {
        return 1;
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
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

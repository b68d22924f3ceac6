//! @ai:module:intent CLI for the algorithm telemetry service
//! @ai:module:layer presentation

use algo_telemetry::{
    catalog::{CatalogLoader, CatalogLoaderTrait, ExecutionDraft},
    client::ApiClient,
    config::ServiceConfig,
    report::{ReportGenerator, StatsReport},
    server::{self, AppContext},
    stats::{CategoryStatsEntry, StatsAggregator},
    store::{seed_catalog, MemoryStore},
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = "algo-telemetry.toml";
const DEFAULT_URL: &str = "http://127.0.0.1:8000";

#[derive(Parser)]
#[command(name = "algo-telemetry")]
#[command(about = "Catalog and execution telemetry API for algorithm demonstrations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print performance statistics from a running server
    Stats {
        /// Base URL of the API
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,

        /// Restrict to one category (sorting, searching, pathfinding)
        #[arg(short = 't', long = "type")]
        category: Option<String>,
    },

    /// Submit one execution record to a running server
    Record {
        /// Base URL of the API
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,

        /// Algorithm id
        #[arg(short, long)]
        algorithm: u64,

        /// Input size
        #[arg(long)]
        array_size: u64,

        /// Execution time in milliseconds
        #[arg(long)]
        execution_time: f64,

        #[arg(long, default_value = "0")]
        comparisons: u64,

        #[arg(long, default_value = "0")]
        swaps: u64,
    },

    /// Write JSON, Markdown and chart reports from a running server
    Report {
        /// Base URL of the API
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,

        /// Restrict to one category
        #[arg(short = 't', long = "type")]
        category: Option<String>,

        /// Output directory for reports
        #[arg(short, long, default_value = "reports")]
        output: PathBuf,
    },

    /// Validate seed catalog files
    Validate {
        /// Catalog directory (defaults to the configured one)
        #[arg(long)]
        catalog_dir: Option<PathBuf>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("algo_telemetry=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, port } => run_server(config, port).await,
        Commands::Stats { url, category } => print_stats(&url, category).await,
        Commands::Record {
            url,
            algorithm,
            array_size,
            execution_time,
            comparisons,
            swaps,
        } => {
            let draft = ExecutionDraft {
                algorithm,
                array_size,
                execution_time,
                comparisons,
                swaps,
            };
            record_execution(&url, &draft).await
        }
        Commands::Report {
            url,
            category,
            output,
        } => generate_reports(&url, category, output).await,
        Commands::Validate {
            catalog_dir,
            config,
        } => validate(catalog_dir, config),
        Commands::Init { output } => init_config(output),
    }
}

/// @ai:intent Open the store, seed it and serve the API until Ctrl-C
/// @ai:effects network, fs:read, fs:write
async fn run_server(config_path: Option<PathBuf>, port: Option<u16>) -> Result<()> {
    let mut config = load_or_default_config(config_path)?;

    if let Some(port) = port {
        config.server.port = port;
    }

    let store = match &config.storage.data_file {
        Some(path) => MemoryStore::open(path)
            .await
            .with_context(|| format!("Failed to open store at {}", path.display()))?,
        None => {
            tracing::warn!("No data_file configured; records will not survive a restart");
            MemoryStore::new()
        }
    };

    if let Some(dir) = &config.storage.catalog_dir {
        let drafts = CatalogLoader::new().load_all(dir)?;
        seed_catalog(&store, drafts).await?;
    }

    let aggregator =
        StatsAggregator::new(config.stats).with_store_timeout(config.server.store_timeout());

    if config.stats.round {
        tracing::info!("Rounding averages to {} decimal places", config.stats.precision);
    }

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr()?).await?;

    server::serve(listener, AppContext::new(store, aggregator), shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// @ai:intent Fetch and print performance statistics
/// @ai:effects network
async fn print_stats(url: &str, category: Option<String>) -> Result<()> {
    let client = ApiClient::new(url)?;
    let stats = client.performance_stats(category.as_deref()).await?;

    print_stats_table(&stats);
    Ok(())
}

fn print_stats_table(stats: &[CategoryStatsEntry]) {
    println!(
        "{:<14} {:>10} {:>14} {:>16} {:>10}",
        "Category", "Executions", "Avg Time (ms)", "Avg Comparisons", "Avg Swaps"
    );
    println!("{}", "-".repeat(68));

    for entry in stats {
        println!(
            "{:<14} {:>10} {:>14.2} {:>16.1} {:>10.1}",
            entry.category.as_str(),
            entry.total_executions,
            entry.avg_execution_time,
            entry.avg_comparisons,
            entry.avg_swaps
        );
    }
}

/// @ai:intent Submit one execution
/// @ai:effects network
async fn record_execution(url: &str, draft: &ExecutionDraft) -> Result<()> {
    let client = ApiClient::new(url)?;
    let record = client.record_execution(draft).await?;

    println!(
        "Recorded execution #{} for {} ({} elements, {:.2}ms)",
        record.id, record.algorithm_name, record.array_size, record.execution_time
    );
    Ok(())
}

/// @ai:intent Fetch stats and write all reports
/// @ai:effects network, fs:write
async fn generate_reports(url: &str, category: Option<String>, output: PathBuf) -> Result<()> {
    let client = ApiClient::new(url)?;

    let entries = client.performance_stats(category.as_deref()).await?;
    let catalog = client.catalog_counts().await?;
    let report = StatsReport::new(category, entries, catalog);

    let timestamp = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%S");
    let output_dir = output.join(timestamp.to_string());

    ReportGenerator::new().generate_all(&report, &output_dir)?;
    print_stats_table(&report.entries);

    Ok(())
}

/// @ai:intent Report seed files that would be skipped
/// @ai:effects fs:read
fn validate(catalog_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let dir = match catalog_dir {
        Some(dir) => dir,
        None => load_or_default_config(config_path)?
            .storage
            .catalog_dir
            .context("No catalog directory given or configured")?,
    };

    let loader = CatalogLoader::new();
    let issues = loader.check(&dir)?;

    if !issues.is_empty() {
        for issue in &issues {
            println!("  ✗ {}: {}", issue.path.display(), issue.reason);
        }
        anyhow::bail!("{} invalid seed file(s) in {}", issues.len(), dir.display());
    }

    let drafts = loader.load_all(&dir)?;
    println!("Catalog validation passed!");
    println!("Total algorithms: {}", drafts.len());

    for draft in &drafts {
        println!("  - {} ({})", draft.name, draft.algorithm_type);
    }

    Ok(())
}

/// @ai:intent Write default configuration
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = ServiceConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

fn load_or_default_config(path: Option<PathBuf>) -> Result<ServiceConfig> {
    match path {
        Some(p) => ServiceConfig::load(&p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG);

            if default_path.exists() {
                ServiceConfig::load(&default_path)
            } else {
                Ok(ServiceConfig::default())
            }
        }
    }
}

//! fileagent - Main Entry Point

use clap::{Parser, Subcommand};
use fileagent::config::AgentConfig;
use fileagent::embeddings::{EmbeddingProvider, HttpEmbeddingProvider};
use fileagent::observability::init_default_logging;
use fileagent::routing::TaskMatcher;
use fileagent::server::AgentServer;
use fileagent::tasks::TaskCatalog;
use fileagent::workspace::Workspace;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

/// Single-endpoint automation agent for file-processing tasks
#[derive(Parser)]
#[command(name = "fileagent")]
#[command(about = "Routes free-text tasks to deterministic file operations")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the agent HTTP server
    Run,
    /// Validate configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging();

    info!("Starting fileagent v{}", env!("CARGO_PKG_VERSION"));

    let config = match load_configuration(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Run => run_agent(config).await,
        Commands::Config { show } => handle_config_command(config, show),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }

    info!("Application shutdown complete");
}

fn load_configuration(
    config_path: &Option<PathBuf>,
) -> Result<AgentConfig, Box<dyn std::error::Error>> {
    match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Ok(AgentConfig::load_from_file(path)?)
        }
        None => {
            // Try default locations
            let default_paths = vec!["fileagent.toml", "config/fileagent.toml"];

            for path_str in default_paths {
                let path = PathBuf::from(path_str);
                if path.exists() {
                    info!("Loading configuration from: {}", path.display());
                    return Ok(AgentConfig::load_from_file(&path)?);
                }
            }

            error!(
                "No configuration file found. Please provide one with -c/--config or create fileagent.toml"
            );
            process::exit(1);
        }
    }
}

async fn run_agent(config: AgentConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Agent starting with ID: {}", config.agent.id);

    let server = build_server(&config)?;
    let routes = server.routes();

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| format!("invalid server address: {e}"))?;

    let (bound, serving) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
        wait_for_shutdown_signal().await;
        info!("Shutdown signal received, draining connections");
    });

    info!("Agent is listening on {}", bound);
    serving.await;

    Ok(())
}

/// Provider factory - creates the embedding capability from configuration
fn build_embedding_provider(config: &AgentConfig) -> Arc<dyn EmbeddingProvider> {
    Arc::new(HttpEmbeddingProvider::new(
        &config.embeddings.base_url,
        config.embeddings.dimension,
        config.embeddings.timeout_secs,
    ))
}

/// Bootstrap factory - assembles the server with injected dependencies
fn build_server(config: &AgentConfig) -> Result<Arc<AgentServer>, Box<dyn std::error::Error>> {
    let embeddings = build_embedding_provider(config);
    let matcher = TaskMatcher::new();
    let catalog = TaskCatalog::from_config(config, embeddings);
    let workspace = Workspace::new(config.data.root.clone());

    Ok(Arc::new(AgentServer::new(
        config.agent.id.clone(),
        matcher,
        catalog,
        workspace,
    )))
}

async fn wait_for_shutdown_signal() {
    let mut sigint = match signal::unix::signal(signal::unix::SignalKind::interrupt()) {
        Ok(sig) => sig,
        Err(e) => {
            error!("Failed to install SIGINT handler: {}", e);
            return;
        }
    };
    let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(sig) => sig,
        Err(e) => {
            error!("Failed to install SIGTERM handler: {}", e);
            return;
        }
    };

    tokio::select! {
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }
}

fn handle_config_command(
    config: AgentConfig,
    show: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if show {
        println!("Current configuration:");
        println!("{}", toml::to_string_pretty(&config)?);
    }

    info!("Configuration validation complete");
    Ok(())
}

//! newsrag CLI
//!
//! Ingests financial news into a local vector collection and answers
//! questions about it, from the command line or over HTTP.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, IngestCommand, ServeCommand, StatsCommand};
use newsrag_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// newsrag - financial news question answering over a local collection
#[derive(Parser, Debug)]
#[command(name = "newsrag")]
#[command(about = "Financial news question answering with retrieval-augmented generation", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "NEWSRAG_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file (default: <workspace>/.newsrag/config.yaml)
    #[arg(short, long, global = true, env = "NEWSRAG_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the vector collection
    #[arg(long, global = true)]
    db_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Generation provider (groq, ollama)
    #[arg(short, long, global = true)]
    provider: Option<String>,

    /// Generation model identifier
    #[arg(short, long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch news for a topic and store it
    Ingest(IngestCommand),

    /// Run the HTTP query API
    Serve(ServeCommand),

    /// Ask a single question
    Ask(AskCommand),

    /// Show collection statistics
    Stats(StatsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Environment and config file first, then CLI overrides
    let config = AppConfig::load(cli.workspace, cli.config)?.with_overrides(
        cli.db_dir,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );
    config.validate()?;

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("newsrag starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Collection: {} in {:?}", config.collection, config.db_dir);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    let command_name = match &cli.command {
        Commands::Ingest(_) => "ingest",
        Commands::Serve(_) => "serve",
        Commands::Ask(_) => "ask",
        Commands::Stats(_) => "stats",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Ingest(cmd) => cmd.execute(&config).await,
        Commands::Serve(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Stats(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}

//! ClauseScan command-line client
//!
//! Uploads a contract PDF to the clause analysis service and prints the
//! detected clause categories.
//!
//! ```text
//! clausescan analyze contract.pdf
//! clausescan --server http://analyzer:5000 analyze contract.pdf --json
//! clausescan health
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use clause_core::{UiState, UploadController};
use clausescan::{
    exit_status, read_selection, ClientConfig, HttpAnalyzer, OutputMode, TerminalSurface,
};
use tracing::{debug, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for the ClauseScan client
#[derive(Parser, Debug)]
#[command(name = "clausescan")]
#[command(about = "Detect contract clauses in a PDF via the ClauseScan service", version)]
struct Args {
    /// Base URL of the analysis service
    #[arg(long, env = "CLAUSESCAN_SERVER", global = true)]
    server: Option<String>,

    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a PDF and print the detected clauses
    Analyze {
        /// Document to analyze
        file: Option<PathBuf>,

        /// Print the validated result as JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
    /// Check that the analysis service is up
    Health,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only results
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    }
    .with_base_url(args.server.clone())?;
    debug!(upload_url = %config.upload_url(), "resolved configuration");

    let analyzer = HttpAnalyzer::new(&config).context("Failed to build HTTP client")?;

    match args.command {
        Command::Analyze { file, json } => {
            let mode = if json { OutputMode::Json } else { OutputMode::Text };
            let selection = read_selection(file.as_deref()).await?;

            let controller =
                UploadController::new(analyzer, TerminalSurface::new(io::stdout(), mode));
            controller.file_selected(selection.as_ref().map(|r| r.filename.as_str()));
            let outcome = controller.submit(selection).await;

            if mode == OutputMode::Json {
                if let UiState::Results(result) = &*controller.state() {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(result).context("Failed to encode result")?
                    );
                }
            }

            Ok(ExitCode::from(exit_status(outcome)))
        }
        Command::Health => match analyzer.health().await {
            Ok(health) if health.is_healthy() => {
                println!("{}: {}", config.health_url(), health.status);
                Ok(ExitCode::SUCCESS)
            }
            Ok(health) => {
                println!("{}: {}", config.health_url(), health.status);
                Ok(ExitCode::FAILURE)
            }
            Err(err) => {
                eprintln!("{}: {}", config.health_url(), err);
                Ok(ExitCode::FAILURE)
            }
        },
    }
}

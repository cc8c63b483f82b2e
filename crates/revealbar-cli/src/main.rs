use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

use revealbar_core::{AppConfig, HeaderVariant};

mod commands;

#[derive(Parser)]
#[command(name = "revealbar")]
#[command(author, version, about = "Collapsing header playground and scroll trace replayer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Header variant to use (overrides config)
    #[arg(short = 'v', long = "variant", global = true)]
    variant: Option<HeaderVariant>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive header screen
    Run,
    /// Replay a recorded scroll trace and print the header timeline
    Replay {
        /// Path to a JSON scroll trace
        trace: PathBuf,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file if none exists
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load()?;
    if let Some(variant) = cli.variant {
        config.header.variant = variant;
    }

    // Initialize logging. The header screen owns the terminal, so it logs
    // to a file instead of stderr.
    let interactive = matches!(cli.command, Some(Commands::Run) | None);
    let (writer, ansi) = if interactive {
        (log_file_writer()?, false)
    } else {
        (BoxMakeWriter::new(std::io::stderr), true)
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .init();

    // Handle commands
    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Replay { trace, json }) => {
            commands::replay::run(&config, &trace, json).await
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init => commands::config::init(),
        },
    }
}

fn log_file_writer() -> Result<BoxMakeWriter> {
    let path = AppConfig::log_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    Ok(BoxMakeWriter::new(std::sync::Mutex::new(file)))
}

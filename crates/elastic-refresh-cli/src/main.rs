use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use elastic_refresh_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "elastic-refresh")]
#[command(author, version, about = "Render and simulate the elastic pull-to-refresh effect")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ~/.config/elastic-refresh/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Svg,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a single frame
    Render {
        #[arg(long, default_value_t = 320.0)]
        width: f64,
        #[arg(long, default_value_t = 100.0)]
        height: f64,
        /// Pull progress as a fraction of the view height
        #[arg(short, long, default_value_t = 0.0)]
        progress: f64,
        /// Override the configured threshold
        #[arg(short, long)]
        threshold: Option<f64>,
        /// Render the spinner instead of the drag
        #[arg(short, long)]
        refreshing: bool,
        /// Spinner ticks to run before rendering (with --refreshing)
        #[arg(long, default_value_t = 0)]
        ticks: u32,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,
    },
    /// Run a full pull, refresh and settle cycle in real time
    Simulate {
        #[arg(long, default_value_t = 320.0)]
        width: f64,
        #[arg(long, default_value_t = 100.0)]
        height: f64,
        /// How long the drag lasts
        #[arg(long, default_value_t = 600)]
        pull_ms: u64,
        /// Pull progress reached at the end of the drag
        #[arg(long, default_value_t = 1.2)]
        pull_to: f64,
        /// How long the refresh keeps the spinner running
        #[arg(long, default_value_t = 2000)]
        refresh_ms: u64,
        /// Minimum gap between printed frames
        #[arg(long, default_value_t = 100)]
        every_ms: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Commands::Render {
            width,
            height,
            progress,
            threshold,
            refreshing,
            ticks,
            format,
        } => commands::render::run(
            &config,
            commands::render::Frame {
                width,
                height,
                progress,
                threshold,
                refreshing,
                ticks,
            },
            format,
        ),
        Commands::Simulate {
            width,
            height,
            pull_ms,
            pull_to,
            refresh_ms,
            every_ms,
        } => {
            commands::simulate::run(
                config,
                commands::simulate::Plan {
                    width,
                    height,
                    pull_ms,
                    pull_to,
                    refresh_ms,
                    every_ms,
                },
            )
            .await
        }
    }
}

//! Showcase: project gallery built from a GitHub repository of project folders.

mod catalog;
mod cli;
mod config;
mod detail;
mod error;
mod gallery;
mod render;
mod resolver;
mod server;
mod sources;
mod status;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "showcase",
    version,
    about = "Project gallery built from a GitHub repository"
)]
struct Cli {
    /// Config file (default: ~/.config/showcase/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: cli::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with RUST_LOG env filter
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        cli::Commands::Serve { bind } => cli::serve::run(config, bind).await,
        cli::Commands::Catalog { json } => cli::catalog::run(config, json).await,
        cli::Commands::Resolve { name } => cli::resolve::run(config, name).await,
        cli::Commands::Show { name, json } => cli::show::run(config, name, json).await,
        cli::Commands::Doctor => cli::doctor::run(config).await,
    }
}

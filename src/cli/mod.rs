//! CLI command definitions and handlers.

pub mod catalog;
pub mod doctor;
pub mod resolve;
pub mod serve;
pub mod show;

use std::net::SocketAddr;
use std::path::Path;

use clap::Subcommand;

use crate::config::{load_config, load_config_from, AppConfig};
use crate::error::ShowcaseError;

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the project gallery over HTTP
    Serve {
        /// Address to listen on (overrides server.bind)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },

    /// Build the project catalog and print it
    Catalog {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a project name to its folder in the repository
    Resolve {
        /// Project name, or an already qualified path
        name: String,
    },

    /// Show one project's metadata
    Show {
        /// Project name, or an already qualified path
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check configuration and repository access
    Doctor,
}

/// Load config from `path` when given, otherwise from the default location.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ShowcaseError> {
    match path {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
}

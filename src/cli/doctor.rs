//! `showcase doctor`: health check command.

use std::path::Path;

use crate::config::AppConfig;
use crate::sources::github::GitHubSource;
use crate::sources::ContentSource;
use crate::status::Status;

pub async fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    eprintln!("Showcase Doctor");
    eprintln!("===============\n");

    // 1. Config
    eprint!("Config ... ");
    let shown_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::config_path);
    let config = match super::load(config_path) {
        Ok(config) => {
            let origin = if shown_path.exists() { "" } else { ", defaults" };
            eprintln!("OK ({}{origin})", shown_path.display());
            eprintln!("  Repository: {}/{}", config.owner, config.repo);
            eprintln!("  API: {}", config.api_base_url);
            eprintln!("  Revalidate: {}s", config.revalidate.as_secs());
            eprintln!("  Bind: {}", config.bind);
            config
        }
        Err(e) => {
            eprintln!("FAILED: {e}");
            eprintln!();
            return Ok(());
        }
    };

    // 2. Repository root
    eprint!("\nRepository ... ");
    let source = GitHubSource::new(&config)?;
    match source.list_directory("").await {
        Ok(entries) => {
            eprintln!("OK ({})", config.contents_url());
            let folders: Vec<&str> = entries
                .iter()
                .filter(|e| e.is_dir())
                .map(|e| e.name.as_str())
                .collect();
            let grouped: Vec<&str> = folders
                .iter()
                .copied()
                .filter(|name| Status::from_folder(name).is_some())
                .collect();
            if grouped.is_empty() {
                eprintln!("  Layout: flat ({} project folder(s))", folders.len());
            } else {
                eprintln!("  Layout: status folders ({})", grouped.join(", "));
            }
        }
        Err(e) => {
            eprintln!("UNREACHABLE");
            eprintln!("  {e}");
        }
    }

    eprintln!();
    Ok(())
}

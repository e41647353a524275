//! `showcase resolve`: project path lookup command.

use std::path::Path;

use crate::resolver::resolve_project_path;
use crate::sources::github::GitHubSource;

pub async fn run(config_path: Option<&Path>, name: String) -> anyhow::Result<()> {
    let config = super::load(config_path)?;
    let source = GitHubSource::new(&config)?;

    match resolve_project_path(&source, &name).await {
        Some(path) => println!("{path}"),
        None => {
            eprintln!("Project not found: {name}");
            std::process::exit(1);
        }
    }

    Ok(())
}

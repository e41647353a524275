//! `showcase catalog`: catalog listing command.

use std::path::Path;

use crate::catalog::build_catalog;
use crate::sources::github::GitHubSource;

pub async fn run(config_path: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let config = super::load(config_path)?;
    let source = GitHubSource::new(&config)?;

    let projects = build_catalog(&source).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    if projects.is_empty() {
        eprintln!("No projects found in {}/{}", config.owner, config.repo);
        return Ok(());
    }

    for (i, project) in projects.iter().enumerate() {
        println!("{}. {} [{}]", i + 1, project.name, project.status);
        println!("   Path: {}", project.path);
        if !project.description.is_empty() {
            println!("   {}", project.description);
        }
        if !project.tags.is_empty() {
            println!("   Tags: {}", project.tags.join(", "));
        }
        if let Some(url) = &project.redirect_url {
            println!("   Redirect: {url}");
        }
        println!();
    }

    eprintln!("{} project(s) found", projects.len());
    Ok(())
}

//! `showcase show`: single project metadata command.

use std::path::Path;

use crate::resolver::resolve_project_path;
use crate::sources::github::GitHubSource;
use crate::sources::markdown::extract_metadata;
use crate::status::Status;

pub async fn run(config_path: Option<&Path>, name: String, json: bool) -> anyhow::Result<()> {
    let config = super::load(config_path)?;
    let source = GitHubSource::new(&config)?;

    let Some(path) = resolve_project_path(&source, &name).await else {
        eprintln!("Project not found: {name}");
        std::process::exit(1);
    };

    let meta = extract_metadata(&source, &path).await;
    let status = Status::from_path(&path);

    if json {
        let output = serde_json::json!({
            "name": path.rsplit('/').next().unwrap_or(&path),
            "path": path,
            "status": status,
            "description": meta.description,
            "redirectUrl": meta.redirect_url,
            "tags": meta.tags,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Path: {path}");
    println!("Status: {status}");
    if !meta.description.is_empty() {
        println!("Description: {}", meta.description);
    }
    if let Some(url) = &meta.redirect_url {
        println!("Redirect: {url}");
    }
    if !meta.tags.is_empty() {
        println!("Tags: {}", meta.tags.join(", "));
    }

    Ok(())
}

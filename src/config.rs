//! Configuration loading from `~/.config/showcase/config.yaml`.
//!
//! Loads YAML config with defaults, supports env var overrides, and produces
//! the derived GitHub endpoints the content source and renderer need.

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ShowcaseError;

/// One tag category used to color tag badges.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TagCategory {
    /// Category label (e.g. "languages").
    pub name: String,
    /// CSS classes applied to badges in this category.
    pub classes: String,
    /// Tags belonging to the category, matched case-insensitively.
    pub tags: Vec<String>,
}

impl TagCategory {
    fn new(name: &str, classes: &str, tags: &[&str]) -> Self {
        Self {
            name: name.into(),
            classes: classes.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

fn default_tag_categories() -> Vec<TagCategory> {
    vec![
        TagCategory::new(
            "languages",
            "bg-green-200 text-green-700",
            &["python", "typescript", "javascript", "java", "go"],
        ),
        TagCategory::new(
            "frameworksAndLibraries",
            "bg-blue-200 text-blue-700",
            &["react", "next.js", "tailwind css"],
        ),
        TagCategory::new(
            "devOps",
            "bg-amber-200 text-amber-700",
            &["docker", "git", "kubernetes"],
        ),
        TagCategory::new(
            "databases",
            "bg-purple-200 text-purple-700",
            &["mongodb", "sql", "postgresql"],
        ),
        TagCategory::new(
            "hardware",
            "bg-rose-200 text-rose-700",
            &[
                "3d modeling",
                "3d printing",
                "cad",
                "arduino",
                "electrical systems",
                "embedded systems",
            ],
        ),
    ]
}

/// Raw YAML config structure.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    github: GithubConfig,

    #[serde(default)]
    cache: CacheConfig,

    #[serde(default)]
    http: HttpConfig,

    #[serde(default)]
    server: ServerConfig,

    #[serde(default)]
    tags: TagsConfig,
}

#[derive(Debug, Deserialize)]
struct GithubConfig {
    #[serde(default = "default_owner")]
    owner: String,

    #[serde(default = "default_repo")]
    repo: String,

    #[serde(default = "default_api_base_url")]
    api_base_url: String,

    #[serde(default = "default_raw_base_url")]
    raw_base_url: String,

    #[serde(default = "default_web_base_url")]
    web_base_url: String,

    #[serde(default = "default_branch")]
    branch: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            repo: default_repo(),
            api_base_url: default_api_base_url(),
            raw_base_url: default_raw_base_url(),
            web_base_url: default_web_base_url(),
            branch: default_branch(),
        }
    }
}

fn default_owner() -> String {
    "rileybarshak".into()
}

fn default_repo() -> String {
    "projects".into()
}

fn default_api_base_url() -> String {
    "https://api.github.com".into()
}

fn default_raw_base_url() -> String {
    "https://raw.githubusercontent.com".into()
}

fn default_web_base_url() -> String {
    "https://github.com".into()
}

fn default_branch() -> String {
    "HEAD".into()
}

#[derive(Debug, Deserialize)]
struct CacheConfig {
    #[serde(default = "default_revalidate_secs")]
    revalidate_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            revalidate_secs: default_revalidate_secs(),
        }
    }
}

fn default_revalidate_secs() -> u64 {
    3600
}

#[derive(Debug, Deserialize)]
struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
    #[serde(default = "default_bind")]
    bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".into()
}

#[derive(Debug, Deserialize)]
struct TagsConfig {
    #[serde(default = "default_tag_categories")]
    categories: Vec<TagCategory>,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            categories: default_tag_categories(),
        }
    }
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub owner: String,
    pub repo: String,
    pub api_base_url: String,
    pub raw_base_url: String,
    pub web_base_url: String,
    pub branch: String,
    pub revalidate: Duration,
    pub timeout: Duration,
    pub bind: SocketAddr,
    pub tag_categories: Vec<TagCategory>,
}

impl AppConfig {
    /// Config file path.
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("showcase")
            .join("config.yaml")
    }

    /// `{api_base}/repos/{owner}/{repo}/contents`, without a trailing slash.
    pub fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents",
            self.api_base_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }

    /// Root that raw file URLs are resolved against.
    pub fn raw_root(&self) -> String {
        format!(
            "{}/{}/{}/{}/",
            self.raw_base_url.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.branch
        )
    }

    /// Root that repository page URLs are resolved against.
    pub fn blob_root(&self) -> String {
        format!(
            "{}/{}/{}/blob/{}/",
            self.web_base_url.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.branch
        )
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            repo: default_repo(),
            api_base_url: default_api_base_url(),
            raw_base_url: default_raw_base_url(),
            web_base_url: default_web_base_url(),
            branch: default_branch(),
            revalidate: Duration::from_secs(default_revalidate_secs()),
            timeout: Duration::from_secs(default_timeout_secs()),
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            tag_categories: default_tag_categories(),
        }
    }
}

/// Load configuration from the default YAML file + env var overrides.
pub fn load_config() -> Result<AppConfig, ShowcaseError> {
    load_config_from(&AppConfig::config_path())
}

/// Load configuration from `config_path`, falling back to defaults when the
/// file does not exist, then applying environment variable overrides.
pub fn load_config_from(config_path: &Path) -> Result<AppConfig, ShowcaseError> {
    let mut raw = read_config_file(config_path)?;
    apply_env_overrides(&mut raw, |key| env::var(key).ok());
    resolve(raw)
}

/// Parse `config_path`; a missing or blank file is all defaults.
fn read_config_file(config_path: &Path) -> Result<RawConfig, ShowcaseError> {
    if !config_path.exists() {
        return Ok(RawConfig::default());
    }

    let text = std::fs::read_to_string(config_path).map_err(|e| {
        ShowcaseError::Config(format!("Failed to read {}: {e}", config_path.display()))
    })?;
    if text.trim().is_empty() {
        return Ok(RawConfig::default());
    }

    serde_yaml::from_str(&text).map_err(|e| {
        ShowcaseError::Config(format!("Failed to parse {}: {e}", config_path.display()))
    })
}

/// Overlay `SHOWCASE_*` variables, looked up through `lookup`.
fn apply_env_overrides(raw: &mut RawConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("SHOWCASE_OWNER") {
        raw.github.owner = val;
    }
    if let Some(val) = lookup("SHOWCASE_REPO") {
        raw.github.repo = val;
    }
    if let Some(val) = lookup("SHOWCASE_API_URL") {
        raw.github.api_base_url = val;
    }
    if let Some(val) = lookup("SHOWCASE_BIND") {
        raw.server.bind = val;
    }
}

fn resolve(raw: RawConfig) -> Result<AppConfig, ShowcaseError> {
    if raw.github.owner.trim().is_empty() {
        return Err(ShowcaseError::Config("github.owner must not be empty".into()));
    }
    if raw.github.repo.trim().is_empty() {
        return Err(ShowcaseError::Config("github.repo must not be empty".into()));
    }

    let bind: SocketAddr = raw.server.bind.parse().map_err(|e| {
        ShowcaseError::Config(format!("Invalid server.bind '{}': {e}", raw.server.bind))
    })?;

    Ok(AppConfig {
        owner: raw.github.owner,
        repo: raw.github.repo,
        api_base_url: raw.github.api_base_url,
        raw_base_url: raw.github.raw_base_url,
        web_base_url: raw.github.web_base_url,
        branch: raw.github.branch,
        revalidate: Duration::from_secs(raw.cache.revalidate_secs),
        timeout: Duration::from_secs(raw.http.timeout_secs),
        bind,
        tag_categories: raw.tags.categories,
    })
}

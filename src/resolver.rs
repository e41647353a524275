//! Project path resolution.
//!
//! Maps a bare project name to the folder it actually lives in: the legacy
//! flat layout first, then each status folder in order.

use tracing::debug;

use crate::sources::ContentSource;
use crate::status::Status;

/// Resolve `name` to an existing project path, or `None`.
///
/// Inputs containing `/` are already qualified and returned as-is without a
/// probe. Otherwise the first successful listing among `name`,
/// `Completed/name`, `InProgress/name`, `Incomplete/name` wins.
pub async fn resolve_project_path(source: &dyn ContentSource, name: &str) -> Option<String> {
    if name.contains('/') {
        return Some(name.to_string());
    }

    let candidates = std::iter::once(name.to_string()).chain(
        Status::GROUPS
            .iter()
            .map(|status| format!("{}/{name}", status.label())),
    );

    for candidate in candidates {
        match source.list_directory(&candidate).await {
            Ok(_) => return Some(candidate),
            Err(e) => debug!("'{candidate}' not found: {e}"),
        }
    }

    None
}

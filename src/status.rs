//! Project status groupings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of a project, derived from the top-level folder it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Status {
    Completed,
    InProgress,
    Incomplete,
    /// Fallback for repositories without status folders.
    Uncategorized,
}

impl Status {
    /// Status folders, in the order they are probed and emitted.
    pub const GROUPS: [Status; 3] = [Status::Completed, Status::InProgress, Status::Incomplete];

    pub fn label(self) -> &'static str {
        match self {
            Status::Completed => "Completed",
            Status::InProgress => "InProgress",
            Status::Incomplete => "Incomplete",
            Status::Uncategorized => "Uncategorized",
        }
    }

    /// Status whose folder is `name`, compared case-insensitively.
    pub fn from_folder(name: &str) -> Option<Status> {
        Self::GROUPS
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(name))
    }

    /// Status implied by a resolved path's first segment.
    pub fn from_path(path: &str) -> Status {
        match path.split_once('/') {
            Some((folder, _)) => Self::from_folder(folder).unwrap_or(Status::Uncategorized),
            None => Status::Uncategorized,
        }
    }

    /// Badge classes for the gallery.
    pub fn badge_classes(self) -> &'static str {
        match self {
            Status::Completed => "bg-emerald-200 text-emerald-800",
            Status::InProgress => "bg-sky-200 text-sky-800",
            Status::Incomplete => "bg-orange-200 text-orange-800",
            Status::Uncategorized => "bg-gray-200 text-gray-700",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

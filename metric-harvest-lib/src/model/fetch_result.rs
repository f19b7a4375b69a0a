use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A snapshot descriptor returned by a fetch.
///
/// Repository-backed sources carry the on-disk path of the working tree. Documentation
/// sources have no path and use the current UTC date as a pseudo-commit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FetchResult {
    pub repo_path: Option<PathBuf>,
    pub commit: String,
    pub timestamp: DateTime<Utc>,
    pub files: Option<Vec<PathBuf>>,
}

impl FetchResult {
    /// A snapshot of a repository working tree.
    #[must_use]
    pub fn repository(repo_path: impl Into<PathBuf>, commit: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            repo_path: Some(repo_path.into()),
            commit: commit.into(),
            timestamp,
            files: None,
        }
    }

    /// A synthetic snapshot for sources that have no repository.
    ///
    /// The commit is the ISO day of `now`; consumers must not treat it as a content hash.
    #[must_use]
    pub fn documentation(now: DateTime<Utc>) -> Self {
        Self {
            repo_path: None,
            commit: now.format("%Y-%m-%d").to_string(),
            timestamp: now,
            files: None,
        }
    }

    #[must_use]
    pub fn repo_path(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

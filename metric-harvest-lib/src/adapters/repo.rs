use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::error::HarvestError;
use crate::extract::FileMetrics;
use crate::fetch::{FetchRequest, GitFetcher};
use crate::model::{ComponentType, FetchResult, RawMetric};
use crate::normalize::{Provenance, normalize};
use ohno::IntoAppError;
use std::path::{Path, PathBuf};

/// Fetch strategy shared by repository-backed adapters.
#[derive(Debug, Clone)]
pub struct RepoSource {
    fetcher: GitFetcher,
    repo_url: &'static str,
}

impl RepoSource {
    #[must_use]
    pub const fn new(fetcher: GitFetcher, repo_url: &'static str) -> Self {
        Self { fetcher, repo_url }
    }

    pub async fn fetch(&self, ctx: &Context, options: &FetchOptions) -> Result<FetchResult> {
        let request = FetchRequest {
            repo_url: self.repo_url.to_string(),
            commit: options.commit.clone(),
            shallow: true,
            depth: options.depth.max(1),
            force: options.force,
        };

        self.fetcher.fetch(ctx, &request).await
    }
}

/// The working tree of a repository snapshot.
pub fn snapshot_root(snapshot: &FetchResult) -> Result<&Path> {
    snapshot
        .repo_path()
        .ok_or_else(|| HarvestError::NotFound("snapshot has no repository path".to_string()))
        .into_app_err("locating snapshot root")
}

/// A directory the snapshot must contain.
pub fn require_dir(root: &Path, relative: &str) -> Result<PathBuf> {
    let dir = root.join(relative);
    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(HarvestError::NotFound(format!("directory '{relative}' in snapshot")))
            .into_app_err_with(|| format!("expected '{}' to exist", dir.display()))
    }
}

/// A file the snapshot must contain.
pub fn require_file(root: &Path, relative: &str) -> Result<PathBuf> {
    let file = root.join(relative);
    if file.is_file() {
        Ok(file)
    } else {
        Err(HarvestError::NotFound(format!("file '{relative}' in snapshot")))
            .into_app_err_with(|| format!("expected '{}' to exist", file.display()))
    }
}

/// Stamp every definition found in `files` with the adapter's provenance.
///
/// `component` names the component a file belongs to.
pub fn to_raw_metrics(
    adapter: &dyn Adapter,
    files: Vec<FileMetrics>,
    mut component: impl FnMut(&FileMetrics) -> (ComponentType, String),
) -> Vec<RawMetric> {
    let mut metrics = Vec::new();

    for file in files {
        let (component_type, component_name) = component(&file);
        let provenance = Provenance {
            source_category: adapter.source_category(),
            confidence: adapter.confidence(),
            extraction_method: adapter.extraction_method(),
            component_type,
            component_name,
            source_location: file.path.display().to_string(),
            path: file.relative.clone(),
        };

        metrics.extend(file.definitions.into_iter().map(|def| normalize(def, &provenance)));
    }

    metrics
}

/// The file name of `path` without its extension.
#[must_use]
pub fn file_stem(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

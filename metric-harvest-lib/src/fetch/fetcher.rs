use super::LOG_TARGET;
use super::git::{has_commit, head_commit, head_commit_time, repo_arg, run_git_checked};
use super::lock::lock_snapshot;
use super::sidecar::SnapshotMetadata;
use super::slug::repo_slug;
use crate::Result;
use crate::context::Context;
use crate::model::FetchResult;
use chrono::Utc;
use ohno::IntoAppError;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// What to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub repo_url: String,

    /// Commit to check out; `None` or empty means the remote default branch.
    pub commit: Option<String>,

    pub shallow: bool,
    pub depth: u32,

    /// Refetch even when a matching snapshot is cached.
    pub force: bool,
}

impl FetchRequest {
    #[must_use]
    pub fn new(repo_url: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
            commit: None,
            shallow: true,
            depth: 1,
            force: false,
        }
    }

    fn requested_commit(&self) -> Option<&str> {
        self.commit.as_deref().filter(|c| !c.is_empty())
    }
}

/// Materializes git repositories under a cache root.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    cache_root: PathBuf,
}

/// Removes a staging directory unless it was moved into place.
struct StagingDir {
    path: PathBuf,
    armed: bool,
}

impl StagingDir {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn persist(mut self, target: &Path) -> Result<()> {
        fs::rename(&self.path, target)
            .into_app_err_with(|| format!("unable to move '{}' to '{}'", self.path.display(), target.display()))?;
        self.armed = false;
        Ok(())
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if self.armed && self.path.exists() {
            log::debug!(target: LOG_TARGET, "Removing incomplete snapshot '{}'", self.path.display());
            if let Err(e) = fs::remove_dir_all(&self.path) {
                log::warn!(target: LOG_TARGET, "Could not remove incomplete snapshot '{}': {e:#}", self.path.display());
            }
        }
    }
}

impl GitFetcher {
    #[must_use]
    pub fn new(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            cache_root: cache_root.into(),
        }
    }

    #[must_use]
    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Where the working tree for `repo_url` lives.
    pub fn snapshot_dir(&self, repo_url: &str) -> Result<PathBuf> {
        Ok(self.cache_root.join(repo_slug(repo_url)?))
    }

    /// Produce a snapshot for the request, reusing the cached one when possible.
    ///
    /// A cached snapshot is reused without any network access when it is intact, the
    /// request is not forced, and either no commit was requested or the cached commit
    /// matches the requested one.
    pub async fn fetch(&self, ctx: &Context, request: &FetchRequest) -> Result<FetchResult> {
        ctx.check()?;

        let slug = repo_slug(&request.repo_url)?;
        fs::create_dir_all(&self.cache_root)
            .into_app_err_with(|| format!("unable to create cache directory '{}'", self.cache_root.display()))?;

        let _guard = ctx.run(lock_snapshot(&self.cache_root, &slug)).await?;

        let tree = self.cache_root.join(&slug);
        let sidecar_path = self.cache_root.join(format!("{slug}.json"));

        if !request.force
            && let Some(snapshot) = reuse_snapshot(&tree, &sidecar_path, request)
        {
            log::info!(target: LOG_TARGET, "Using cached snapshot of '{}' at {}", request.repo_url, snapshot.commit);
            return Ok(snapshot);
        }

        let start_time = Instant::now();
        log::info!(target: LOG_TARGET, "Fetching '{}'", request.repo_url);

        let staging = StagingDir::new(self.cache_root.join(format!(".{slug}.partial-{}", std::process::id())));
        if staging.path.exists() {
            fs::remove_dir_all(&staging.path)
                .into_app_err_with(|| format!("unable to remove stale staging directory '{}'", staging.path.display()))?;
        }

        clone_into(ctx, request, &staging.path).await?;

        let commit = head_commit(ctx, &staging.path).await?;
        let committed_at = match head_commit_time(ctx, &staging.path).await {
            Ok(time) => Some(time),
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Could not read commit time of '{}': {e:#}", request.repo_url);
                None
            }
        };

        ctx.check()?;

        let fetched_at = Utc::now();
        let metadata = SnapshotMetadata {
            repo_url: request.repo_url.clone(),
            commit: commit.clone(),
            fetched_at,
            committed_at,
        };
        install_snapshot(staging, &tree, &sidecar_path, &metadata)?;

        log::info!(target: LOG_TARGET,
            "Fetched '{}' at {commit} in {:.3}s",
            request.repo_url,
            start_time.elapsed().as_secs_f64()
        );

        Ok(FetchResult::repository(tree, commit, committed_at.unwrap_or(fetched_at)))
    }
}

/// Swap a staged tree into place and record its metadata.
///
/// The old sidecar is removed before the old tree, so an interrupted swap leaves a
/// tree without metadata, which is never reused.
fn install_snapshot(staging: StagingDir, tree: &Path, sidecar_path: &Path, metadata: &SnapshotMetadata) -> Result<()> {
    if let Err(e) = fs::remove_file(sidecar_path)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        return Err(e).into_app_err_with(|| format!("unable to remove snapshot metadata '{}'", sidecar_path.display()));
    }

    if tree.exists() {
        fs::remove_dir_all(tree).into_app_err_with(|| format!("unable to replace cached snapshot '{}'", tree.display()))?;
    }

    staging.persist(tree)?;
    metadata.save(sidecar_path)
}

fn reuse_snapshot(tree: &Path, sidecar_path: &Path, request: &FetchRequest) -> Option<FetchResult> {
    if !tree.exists() {
        return None;
    }

    if !tree.join(".git").exists() {
        log::warn!(target: LOG_TARGET, "Cached snapshot '{}' has no .git directory, refetching", tree.display());
        return None;
    }

    let metadata = match SnapshotMetadata::load(sidecar_path) {
        Ok(metadata) => metadata,
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Snapshot metadata for '{}' is unusable, refetching: {e:#}", tree.display());
            return None;
        }
    };

    if metadata.repo_url != request.repo_url {
        log::warn!(target: LOG_TARGET,
            "Cached snapshot '{}' belongs to '{}', refetching",
            tree.display(),
            metadata.repo_url
        );
        return None;
    }

    if let Some(requested) = request.requested_commit()
        && !metadata.commit.starts_with(requested)
    {
        log::debug!(target: LOG_TARGET, "Cached commit {} differs from requested {requested}", metadata.commit);
        return None;
    }

    let timestamp = metadata.committed_at.unwrap_or(metadata.fetched_at);
    Some(FetchResult::repository(tree, metadata.commit, timestamp))
}

async fn clone_into(ctx: &Context, request: &FetchRequest, staging: &Path) -> Result<()> {
    let target = repo_arg(staging)?;
    let depth = request.depth.max(1).to_string();

    let mut args = vec!["clone", "--no-tags"];
    if request.shallow {
        args.extend(["--depth", depth.as_str(), "--single-branch"]);
    }
    args.extend(["--", request.repo_url.as_str(), target]);

    let _ = run_git_checked(ctx, &args, "git clone").await?;

    let Some(commit) = request.requested_commit() else {
        return Ok(());
    };

    if !has_commit(ctx, staging, commit).await? {
        let mut args = vec!["-C", target, "fetch", "--no-tags"];
        if request.shallow {
            args.extend(["--depth", depth.as_str()]);
        }
        args.extend(["origin", commit]);
        let _ = run_git_checked(ctx, &args, "git fetch").await?;
    }

    let _ = run_git_checked(ctx, &["-C", target, "checkout", "--quiet", "--detach", commit], "git checkout").await?;
    Ok(())
}

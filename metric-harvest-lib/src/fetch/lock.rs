use super::LOG_TARGET;
use crate::Result;
use fs4::fs_std::FileExt;
use ohno::IntoAppError;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Holds the per-repository lock until dropped.
#[derive(Debug)]
pub struct SnapshotLockGuard(File);

impl Drop for SnapshotLockGuard {
    fn drop(&mut self) {
        if let Err(e) = self.0.unlock() {
            log::warn!(target: LOG_TARGET, "Could not release snapshot lock: {e:#}");
        }
    }
}

/// Acquire the exclusive lock for one repository slug under `cache_root`.
///
/// Waiting happens on a blocking thread. Locks for different slugs are independent.
pub async fn lock_snapshot(cache_root: &Path, slug: &str) -> Result<SnapshotLockGuard> {
    let lock_path = cache_root.join(format!("{slug}.lock"));

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .into_app_err_with(|| format!("opening snapshot lock file '{}'", lock_path.display()))?;

    let file = tokio::task::spawn_blocking(move || {
        file.lock_exclusive()
            .into_app_err_with(|| format!("acquiring exclusive lock '{}'", lock_path.display()))?;
        log::debug!(target: LOG_TARGET, "Acquired snapshot lock '{}'", lock_path.display());
        Ok::<_, ohno::AppError>(file)
    })
    .await
    .into_app_err("lock task panicked")??;

    Ok(SnapshotLockGuard(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicBool, Ordering};
    use core::time::Duration;
    use std::sync::Arc;

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_lock_file_is_named_after_slug() {
        let temp_dir = tempfile::tempdir().unwrap();
        let guard = lock_snapshot(temp_dir.path(), "github.com_google_cadvisor").await.unwrap();
        assert!(temp_dir.path().join("github.com_google_cadvisor.lock").exists());
        drop(guard);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_relock_after_drop() {
        let temp_dir = tempfile::tempdir().unwrap();
        drop(lock_snapshot(temp_dir.path(), "a").await.unwrap());
        drop(lock_snapshot(temp_dir.path(), "a").await.unwrap());
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_different_slugs_do_not_block() {
        let temp_dir = tempfile::tempdir().unwrap();
        let first = lock_snapshot(temp_dir.path(), "a").await.unwrap();
        let second = tokio::time::timeout(Duration::from_secs(5), lock_snapshot(temp_dir.path(), "b"))
            .await
            .unwrap()
            .unwrap();
        drop(first);
        drop(second);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_same_slug_serializes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().to_path_buf();
        let released = Arc::new(AtomicBool::new(false));

        let guard = lock_snapshot(&root, "same").await.unwrap();

        let waiter_released = Arc::clone(&released);
        let waiter = tokio::spawn(async move {
            let guard = lock_snapshot(&root, "same").await.unwrap();
            assert!(waiter_released.load(Ordering::SeqCst));
            drop(guard);
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        released.store(true, Ordering::SeqCst);
        drop(guard);

        waiter.await.unwrap();
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetFullPathNameW")]
    async fn test_missing_root_fails() {
        let result = lock_snapshot(Path::new("no_such_cache_root_31415"), "x").await;
        let _ = result.unwrap_err();
    }
}

use super::LOG_TARGET;
use crate::Result;
use crate::context::Context;
use crate::error::HarvestError;
use chrono::{DateTime, Utc};
use ohno::IntoAppError;
use std::path::Path;
use std::process::{Output, Stdio};
use tokio::process::Command;

/// Stderr fragments git prints when a requested revision does not exist.
const UNKNOWN_REVISION_MARKERS: &[&str] = &[
    "not our ref",
    "unadvertised object",
    "couldn't find remote ref",
    "unknown revision",
    "did not match any",
    "reference is not a tree",
    "not a valid object name",
    "bad object",
];

/// Run git with `args`, bounded by the context's cancellation and deadline.
///
/// The child is killed if the context ends first.
pub async fn run_git(ctx: &Context, args: &[&str]) -> Result<Output> {
    ctx.check()?;
    log::debug!(target: LOG_TARGET, "Running 'git {}'", args.join(" "));

    let child = Command::new("git")
        .args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .into_app_err("could not spawn git command")?;

    ctx.run(async move {
        child
            .wait_with_output()
            .await
            .into_app_err_with(|| format!("'git {}' failed to run", args.join(" ")))
    })
    .await
}

/// Run git and fail unless it exits successfully.
pub async fn run_git_checked(ctx: &Context, args: &[&str], operation: &str) -> Result<Output> {
    let output = run_git(ctx, args).await?;
    check_git_output(&output, operation)?;
    Ok(output)
}

/// Classify a git failure: unknown revisions are not-found, everything else is transient.
pub fn check_git_output(output: &Output, operation: &str) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();

    if UNKNOWN_REVISION_MARKERS.iter().any(|marker| stderr.contains(marker)) {
        return Err(HarvestError::NotFound(stderr.to_string())).into_app_err_with(|| format!("{operation} failed"));
    }

    Err(HarvestError::Transient(stderr.to_string())).into_app_err_with(|| format!("{operation} failed: {stderr}"))
}

/// The commit checked out in `repo`.
pub async fn head_commit(ctx: &Context, repo: &Path) -> Result<String> {
    let path = repo_arg(repo)?;
    let output = run_git_checked(ctx, &["-C", path, "rev-parse", "HEAD"], "git rev-parse").await?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// The committer time of `HEAD` in `repo`.
pub async fn head_commit_time(ctx: &Context, repo: &Path) -> Result<DateTime<Utc>> {
    let path = repo_arg(repo)?;
    let output = run_git_checked(ctx, &["-C", path, "show", "-s", "--format=%cI", "HEAD"], "git show").await?;
    let text = String::from_utf8_lossy(&output.stdout);
    let time = DateTime::parse_from_rfc3339(text.trim()).into_app_err_with(|| format!("unexpected commit time '{}'", text.trim()))?;
    Ok(time.with_timezone(&Utc))
}

/// Whether `commit` is already present in `repo`.
pub async fn has_commit(ctx: &Context, repo: &Path, commit: &str) -> Result<bool> {
    let path = repo_arg(repo)?;
    let object = format!("{commit}^{{commit}}");
    let output = run_git(ctx, &["-C", path, "cat-file", "-e", &object]).await?;
    Ok(output.status.success())
}

pub fn repo_arg(repo: &Path) -> Result<&str> {
    repo.to_str().into_app_err("invalid UTF-8 in repository path")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn exit_status(code: i32) -> std::process::ExitStatus {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            std::process::ExitStatus::from_raw(code << 8)
        }

        #[cfg(windows)]
        {
            use std::os::windows::process::ExitStatusExt;
            #[expect(clippy::cast_sign_loss, reason = "test exit codes are small and positive")]
            std::process::ExitStatus::from_raw(code as u32)
        }
    }

    fn output(code: i32, stderr: &str) -> Output {
        Output {
            status: exit_status(code),
            stdout: Vec::new(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_check_git_output_success() {
        check_git_output(&output(0, ""), "git clone").unwrap();
    }

    #[test]
    fn test_network_failure_is_transient() {
        let err = check_git_output(&output(128, "fatal: unable to access: Could not resolve host"), "git clone").unwrap_err();
        assert_eq!(ErrorKind::of(&err), ErrorKind::Transient);
        assert!(err.to_string().contains("git clone failed"));
    }

    #[test]
    fn test_unknown_revision_is_not_found() {
        for stderr in [
            "fatal: remote error: upload-pack: not our ref 0123456789abcdef0123456789abcdef01234567",
            "fatal: couldn't find remote ref deadbeef",
            "error: pathspec 'deadbeef' did not match any file(s) known to git",
        ] {
            let err = check_git_output(&output(128, stderr), "git fetch").unwrap_err();
            assert_eq!(ErrorKind::of(&err), ErrorKind::NotFound, "{stderr}");
        }
    }

    #[tokio::test]
    async fn test_cancelled_context_stops_git() {
        let ctx = Context::new();
        ctx.cancel();
        let err = run_git(&ctx, &["--version"]).await.unwrap_err();
        assert_eq!(ErrorKind::of(&err), ErrorKind::Cancelled);
    }
}

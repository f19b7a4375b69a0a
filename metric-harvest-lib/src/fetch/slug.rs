use crate::Result;
use ohno::{IntoAppError, bail};
use url::Url;

/// Derive the cache directory name for a repository URL.
///
/// The slug is the host followed by the path segments, joined with `_`, with a trailing
/// `.git` removed. URLs without a host (such as `file://` URLs) use the scheme instead.
pub fn repo_slug(repo_url: &str) -> Result<String> {
    let url = Url::parse(repo_url).into_app_err_with(|| format!("invalid repository URL '{repo_url}'"))?;

    let host = url.host_str().filter(|h| !h.is_empty()).unwrap_or_else(|| url.scheme());

    let mut segments: Vec<&str> = url.path_segments().map(Iterator::collect).unwrap_or_default();
    segments.retain(|s| !s.is_empty());

    if let Some(last) = segments.last_mut() {
        *last = last.strip_suffix(".git").unwrap_or(*last);
    }

    segments.retain(|s| !s.is_empty());
    if segments.is_empty() {
        bail!("repository URL '{repo_url}' has no path");
    }

    let mut slug = sanitize_path_component(host);
    for segment in segments {
        slug.push('_');
        slug.push_str(&sanitize_path_component(segment));
    }

    Ok(slug)
}

/// Make a string safe to use as a single path component.
fn sanitize_path_component(s: &str) -> String {
    s.replace("..", "__")
        .replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|', '%'], "_")
}

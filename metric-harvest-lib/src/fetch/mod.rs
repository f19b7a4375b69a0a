//! Reproducible on-disk snapshots of upstream repositories
//!
//! Every repository gets three entries under the cache root, all named after a slug
//! derived from its URL:
//!
//! - `<slug>/`: the working tree at the resolved commit
//! - `<slug>.lock`: an advisory lock serializing fetches of the same URL
//! - `<slug>.json`: a sidecar recording the URL, commit, and fetch time
//!
//! Fresh clones are staged in a hidden sibling directory and renamed into place, so a
//! failed or cancelled fetch never leaves a partial snapshot behind.

mod fetcher;
mod git;
mod lock;
mod sidecar;
mod slug;

pub use fetcher::{FetchRequest, GitFetcher};
pub use slug::repo_slug;

const LOG_TARGET: &str = "     fetch";

//! Structural extractors
//!
//! Every extractor is a pure function from source text to [`MetricDefinition`] values; none
//! of them executes harvested code. [`scan`] applies an extractor to every file a
//! [`SourceWalker`] selects. Files that cannot be read or parsed are logged and skipped,
//! so a single odd file never fails an adapter.
//!
//! | Extractor | Input |
//! |---|---|
//! | [`CompositeExtractor`] | Go composite literals describing metrics |
//! | [`extract_descriptors`] | Go `prometheus.NewDesc` calls |
//! | [`extract_metric_maps`] | Go map literals naming exported metrics |
//! | [`extract_current_metrics`], [`extract_profile_events`], [`extract_async_metrics`] | ClickHouse C++ metric lists |
//! | [`extract_str_constants`] | `pub const NAME: &str = "…";` declarations |
//! | [`extract_java_builders`] | Java `meter.<kind>Builder("…")` chains |
//! | [`extract_ts_meter_calls`] | TypeScript `meter.createCounter(…)` calls |
//! | [`extract_meter_calls`] | Rust `meter.u64_counter(…)` style calls |
//! | [`extract_semconv_metrics`] | Semantic-convention YAML groups |
//! | [`extract_collector_metrics`] | Collector `metadata.yaml` documents |

mod builder_call;
mod collector_metadata;
mod const_decl;
mod cpp_macro;
mod go_composite;
mod go_desc;
mod go_metric_map;
mod go_syntax;
mod rust_meter;
mod semconv_yaml;
mod walk;

pub use builder_call::{extract_java_builders, extract_ts_meter_calls};
pub use collector_metadata::extract_collector_metrics;
pub use const_decl::{describe_name, extract_str_constants};
pub use cpp_macro::{extract_async_metrics, extract_current_metrics, extract_profile_events};
pub use go_composite::{CompositeExtractor, metadata_unit, value_type_instrument};
pub use go_desc::extract_descriptors;
pub use go_metric_map::extract_metric_maps;
pub use rust_meter::extract_meter_calls;
pub use semconv_yaml::{SemconvMetric, extract_semconv_metrics, parse_semconv};
pub use walk::{SourceWalker, relative_path};

use crate::Result;
use crate::context::Context;
use crate::model::MetricDefinition;
use futures_util::future::join_all;
use ohno::IntoAppError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinHandle, spawn_blocking};

const LOG_TARGET: &str = "   extract";

/// What an extractor found in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetrics<T = MetricDefinition> {
    pub path: PathBuf,

    /// `/`-separated path relative to the snapshot root
    pub relative: String,

    pub definitions: Vec<T>,
}

/// Run `extractor` over every file selected by `walker`.
///
/// Results come back in walk order. Files with no definitions are omitted. The context is
/// checked before each file, so a cancelled scan stops at the next file boundary.
pub async fn scan<T, F>(ctx: &Context, snapshot_root: &Path, walker: SourceWalker, extractor: F) -> Result<Vec<FileMetrics<T>>>
where
    T: Send + 'static,
    F: Fn(&str) -> Result<Vec<T>> + Send + Sync + 'static,
{
    ctx.check()?;

    let files = spawn_blocking(move || walker.walk())
        .await
        .into_app_err("walking source tree")?;

    log::debug!(target: LOG_TARGET, "Scanning {} files under '{}'", files.len(), snapshot_root.display());

    let extractor = Arc::new(extractor);
    let num_workers = std::thread::available_parallelism().map(core::num::NonZero::get).unwrap_or(4);
    let semaphore = Arc::new(Semaphore::new(num_workers));
    let mut tasks: Vec<JoinHandle<Result<Option<FileMetrics<T>>>>> = Vec::with_capacity(files.len());

    for path in files {
        ctx.check()?;

        let permit = Arc::clone(&semaphore).acquire_owned().await.into_app_err("acquiring extraction slot")?;
        let extractor = Arc::clone(&extractor);
        let ctx = ctx.clone();
        let relative = relative_path(snapshot_root, &path);

        tasks.push(spawn_blocking(move || {
            let _permit = permit;
            ctx.check()?;
            Ok(extract_file(&path, relative, extractor.as_ref()))
        }));
    }

    let mut found = Vec::new();
    for task in join_all(tasks).await {
        if let Some(file) = task.into_app_err("extraction task panicked")?? {
            found.push(file);
        }
    }

    Ok(found)
}

fn extract_file<T, F>(path: &Path, relative: String, extractor: &F) -> Option<FileMetrics<T>>
where
    F: Fn(&str) -> Result<Vec<T>>,
{
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            log::debug!(target: LOG_TARGET, "Could not read '{}', skipping: {e:#}", path.display());
            return None;
        }
    };

    let definitions = match extractor(&source) {
        Ok(definitions) => definitions,
        Err(e) => {
            log::debug!(target: LOG_TARGET, "Could not parse '{}', skipping: {e:#}", path.display());
            return None;
        }
    };

    if definitions.is_empty() {
        return None;
    }

    Some(FileMetrics {
        path: path.to_path_buf(),
        relative,
        definitions,
    })
}

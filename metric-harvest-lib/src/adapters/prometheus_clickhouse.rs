//! ClickHouse server metrics, as served by its built-in Prometheus endpoint
//!
//! The server declares three metric families in C++: current metrics and profile events as
//! X-macro lists under `src/Common`, and asynchronous metrics as assignments spread over two
//! translation units. Each family becomes its own component.

use super::repo::{RepoSource, require_dir, snapshot_root, to_raw_metrics};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::extract::{SourceWalker, extract_async_metrics, extract_current_metrics, extract_profile_events, scan};
use crate::fetch::GitFetcher;
use crate::model::{ComponentType, Confidence, ExtractionMethod, FetchResult, RawMetric, SourceCategory};
use std::collections::HashSet;

const REPO_URL: &str = "https://github.com/ClickHouse/ClickHouse";
const SOURCE_DIR: &str = "src";
const COMMON_DIR: &str = "src/Common";

#[derive(Debug, Clone)]
pub struct ClickhouseAdapter {
    source: RepoSource,
}

impl ClickhouseAdapter {
    #[must_use]
    pub const fn new(fetcher: GitFetcher) -> Self {
        Self {
            source: RepoSource::new(fetcher, REPO_URL),
        }
    }
}

#[async_trait::async_trait]
impl Adapter for ClickhouseAdapter {
    fn name(&self) -> &'static str {
        "prometheus-clickhouse"
    }

    fn source_category(&self) -> SourceCategory {
        SourceCategory::Exporter
    }

    fn confidence(&self) -> Confidence {
        Confidence::Authoritative
    }

    fn extraction_method(&self) -> ExtractionMethod {
        ExtractionMethod::Syntactic
    }

    fn repo_url(&self) -> &'static str {
        REPO_URL
    }

    async fn fetch(&self, ctx: &Context, options: &FetchOptions) -> Result<FetchResult> {
        self.source.fetch(ctx, options).await
    }

    async fn extract(&self, ctx: &Context, snapshot: &FetchResult) -> Result<Vec<RawMetric>> {
        let root = snapshot_root(snapshot)?;
        let common = require_dir(root, COMMON_DIR)?;
        let sources = root.join(SOURCE_DIR);

        let current = scan(
            ctx,
            root,
            SourceWalker::new(&common).file_names(&["CurrentMetrics.cpp"]).shallow(),
            extract_current_metrics,
        )
        .await?;

        let events = scan(
            ctx,
            root,
            SourceWalker::new(&common).file_names(&["ProfileEvents.cpp"]).shallow(),
            extract_profile_events,
        )
        .await?;

        let asynchronous = scan(
            ctx,
            root,
            SourceWalker::new(sources)
                .file_names(&["ServerAsynchronousMetrics.cpp", "AsynchronousMetrics.cpp"])
                .max_depth(2),
            extract_async_metrics,
        )
        .await?;

        let mut metrics = to_raw_metrics(self, current, |_| (ComponentType::Platform, "current_metrics".to_string()));
        metrics.extend(to_raw_metrics(self, events, |_| (ComponentType::Platform, "profile_events".to_string())));
        metrics.extend(to_raw_metrics(self, asynchronous, |_| (ComponentType::Platform, "async_metrics".to_string())));

        // Both asynchronous-metrics units may assign the same name.
        let mut seen = HashSet::new();
        metrics.retain(|m| seen.insert(m.name.clone()));

        Ok(metrics)
    }
}

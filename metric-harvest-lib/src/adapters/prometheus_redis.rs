//! Prometheus redis exporter

use super::repo::{RepoSource, require_dir, snapshot_root, to_raw_metrics};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::extract::{SourceWalker, extract_metric_maps, scan};
use crate::fetch::GitFetcher;
use crate::model::{ComponentType, Confidence, ExtractionMethod, FetchResult, RawMetric, SourceCategory};
use std::collections::HashSet;

const REPO_URL: &str = "https://github.com/oliver006/redis_exporter";
const EXPORTER_DIR: &str = "exporter";
const PREFIX: &str = "redis_";
const COMPONENT: &str = "redis";

#[derive(Debug, Clone)]
pub struct RedisAdapter {
    source: RepoSource,
}

impl RedisAdapter {
    #[must_use]
    pub const fn new(fetcher: GitFetcher) -> Self {
        Self {
            source: RepoSource::new(fetcher, REPO_URL),
        }
    }
}

#[async_trait::async_trait]
impl Adapter for RedisAdapter {
    fn name(&self) -> &'static str {
        "prometheus-redis"
    }

    fn source_category(&self) -> SourceCategory {
        SourceCategory::Exporter
    }

    fn confidence(&self) -> Confidence {
        Confidence::Derived
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
        let exporter = require_dir(root, EXPORTER_DIR)?;

        let walker = SourceWalker::new(exporter).extensions(&["go"]).skip_suffixes(&["_test.go"]).shallow();
        let files = scan(ctx, root, walker, |source: &str| extract_metric_maps(source, PREFIX)).await?;

        // Several INFO fields map onto the same exported name.
        let mut seen = HashSet::new();
        let mut metrics = to_raw_metrics(self, files, |_| (ComponentType::Platform, COMPONENT.to_string()));
        metrics.retain(|m| seen.insert(m.name.clone()));

        Ok(metrics)
    }
}

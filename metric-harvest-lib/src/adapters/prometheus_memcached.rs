//! Prometheus memcached exporter

use super::repo::{RepoSource, require_dir, snapshot_root, to_raw_metrics};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::extract::{SourceWalker, extract_descriptors, scan};
use crate::fetch::GitFetcher;
use crate::model::{ComponentType, Confidence, ExtractionMethod, FetchResult, RawMetric, SourceCategory};
use std::collections::HashSet;

const REPO_URL: &str = "https://github.com/prometheus/memcached_exporter";
const EXPORTER_DIR: &str = "pkg/exporter";
const COMPONENT: &str = "memcached";

#[derive(Debug, Clone)]
pub struct MemcachedAdapter {
    source: RepoSource,
}

impl MemcachedAdapter {
    #[must_use]
    pub const fn new(fetcher: GitFetcher) -> Self {
        Self {
            source: RepoSource::new(fetcher, REPO_URL),
        }
    }
}

#[async_trait::async_trait]
impl Adapter for MemcachedAdapter {
    fn name(&self) -> &'static str {
        "prometheus-memcached"
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
        let files = scan(ctx, root, walker, extract_descriptors).await?;

        // Descriptors are declared once per stats family but may be repeated for slab variants.
        let mut seen = HashSet::new();
        let mut metrics = to_raw_metrics(self, files, |_| (ComponentType::Platform, COMPONENT.to_string()));
        metrics.retain(|m| seen.insert(m.name.clone()));

        Ok(metrics)
    }
}

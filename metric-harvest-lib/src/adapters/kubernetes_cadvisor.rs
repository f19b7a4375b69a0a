//! cAdvisor container and machine metrics

use super::repo::{RepoSource, file_stem, require_dir, snapshot_root, to_raw_metrics};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::extract::{CompositeExtractor, SourceWalker, scan};
use crate::fetch::GitFetcher;
use crate::model::{ComponentType, Confidence, ExtractionMethod, FetchResult, RawMetric, SourceCategory};

const REPO_URL: &str = "https://github.com/google/cadvisor";
const METRICS_DIR: &str = "metrics";

const EXTRACTOR: CompositeExtractor = CompositeExtractor::new(&["containerMetric", "machineMetric"]).with_untyped();

#[derive(Debug, Clone)]
pub struct CadvisorAdapter {
    source: RepoSource,
}

impl CadvisorAdapter {
    #[must_use]
    pub const fn new(fetcher: GitFetcher) -> Self {
        Self {
            source: RepoSource::new(fetcher, REPO_URL),
        }
    }
}

#[async_trait::async_trait]
impl Adapter for CadvisorAdapter {
    fn name(&self) -> &'static str {
        "kubernetes-cadvisor"
    }

    fn source_category(&self) -> SourceCategory {
        SourceCategory::ContainerRuntime
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
        let metrics_dir = require_dir(root, METRICS_DIR)?;

        let walker = SourceWalker::new(metrics_dir)
            .extensions(&["go"])
            .skip_suffixes(&["_test.go", "prometheus_fake.go"])
            .shallow();
        let files = scan(ctx, root, walker, |source: &str| EXTRACTOR.extract(source)).await?;

        Ok(to_raw_metrics(self, files, |file| {
            (ComponentType::Platform, file_component(&file_stem(&file.path)))
        }))
    }
}

/// `prometheus_machine` becomes `machine`; `prometheus` itself holds the container metrics.
fn file_component(stem: &str) -> String {
    let name = stem
        .strip_prefix("prometheus_")
        .or_else(|| stem.strip_prefix("prometheus"))
        .unwrap_or(stem);

    if name.is_empty() { "container".to_string() } else { name.to_string() }
}

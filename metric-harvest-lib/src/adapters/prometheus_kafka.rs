//! Kafka exporter

use super::repo::{RepoSource, file_stem, snapshot_root, to_raw_metrics};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::extract::{SourceWalker, extract_descriptors, scan};
use crate::fetch::GitFetcher;
use crate::model::{ComponentType, Confidence, ExtractionMethod, FetchResult, RawMetric, SourceCategory};

const REPO_URL: &str = "https://github.com/danielqsj/kafka_exporter";

#[derive(Debug, Clone)]
pub struct KafkaAdapter {
    source: RepoSource,
}

impl KafkaAdapter {
    #[must_use]
    pub const fn new(fetcher: GitFetcher) -> Self {
        Self {
            source: RepoSource::new(fetcher, REPO_URL),
        }
    }
}

#[async_trait::async_trait]
impl Adapter for KafkaAdapter {
    fn name(&self) -> &'static str {
        "prometheus-kafka"
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

        let walker = SourceWalker::new(root).extensions(&["go"]).skip_suffixes(&["_test.go"]).shallow();
        let files = scan(ctx, root, walker, extract_descriptors).await?;

        Ok(to_raw_metrics(self, files, |file| {
            let stem = file_stem(&file.path);
            let component = stem.strip_suffix("_exporter").unwrap_or(&stem).to_string();
            (ComponentType::Platform, component)
        }))
    }
}

//! PostgreSQL server exporter

use super::repo::{RepoSource, file_stem, require_dir, snapshot_root, to_raw_metrics};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::extract::{SourceWalker, extract_descriptors, scan};
use crate::fetch::GitFetcher;
use crate::model::{ComponentType, Confidence, ExtractionMethod, FetchResult, RawMetric, SourceCategory};

const REPO_URL: &str = "https://github.com/prometheus-community/postgres_exporter";
const COLLECTOR_DIR: &str = "collector";

#[derive(Debug, Clone)]
pub struct PostgresAdapter {
    source: RepoSource,
}

impl PostgresAdapter {
    #[must_use]
    pub const fn new(fetcher: GitFetcher) -> Self {
        Self {
            source: RepoSource::new(fetcher, REPO_URL),
        }
    }
}

#[async_trait::async_trait]
impl Adapter for PostgresAdapter {
    fn name(&self) -> &'static str {
        "prometheus-postgres"
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
        let collector = require_dir(root, COLLECTOR_DIR)?;

        let walker = SourceWalker::new(collector).extensions(&["go"]).skip_suffixes(&["_test.go"]);
        let files = scan(ctx, root, walker, extract_descriptors).await?;

        Ok(to_raw_metrics(self, files, |file| (ComponentType::Platform, file_stem(&file.path))))
    }
}

//! Prometheus node exporter

use super::repo::{RepoSource, file_stem, require_dir, snapshot_root, to_raw_metrics};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::extract::{SourceWalker, extract_descriptors, scan};
use crate::fetch::GitFetcher;
use crate::model::{ComponentType, Confidence, ExtractionMethod, FetchResult, RawMetric, SourceCategory};

const REPO_URL: &str = "https://github.com/prometheus/node_exporter";
const COLLECTOR_DIR: &str = "collector";

/// Build-tag suffixes; `cpu_linux.go` and `cpu_darwin.go` both belong to `cpu`.
const PLATFORM_SUFFIXES: &[&str] = &[
    "_linux",
    "_darwin",
    "_bsd",
    "_freebsd",
    "_netbsd",
    "_openbsd",
    "_dragonfly",
    "_solaris",
    "_common",
];

#[derive(Debug, Clone)]
pub struct NodeAdapter {
    source: RepoSource,
}

impl NodeAdapter {
    #[must_use]
    pub const fn new(fetcher: GitFetcher) -> Self {
        Self {
            source: RepoSource::new(fetcher, REPO_URL),
        }
    }
}

#[async_trait::async_trait]
impl Adapter for NodeAdapter {
    fn name(&self) -> &'static str {
        "prometheus-node"
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

        let walker = SourceWalker::new(collector).extensions(&["go"]).skip_suffixes(&["_test.go"]).shallow();
        let files = scan(ctx, root, walker, extract_descriptors).await?;

        Ok(to_raw_metrics(self, files, |file| {
            (ComponentType::Platform, collector_name(&file_stem(&file.path)))
        }))
    }
}

fn collector_name(stem: &str) -> String {
    let mut name = stem;
    for suffix in PLATFORM_SUFFIXES {
        name = name.strip_suffix(suffix).unwrap_or(name);
    }
    name.to_string()
}

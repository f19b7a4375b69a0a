//! OpenTelemetry Rust contrib instrumentation crates

use super::repo::{RepoSource, snapshot_root, to_raw_metrics};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::extract::{SourceWalker, extract_meter_calls, scan};
use crate::fetch::GitFetcher;
use crate::model::{ComponentType, Confidence, ExtractionMethod, FetchResult, RawMetric, SourceCategory};
use crate::normalize::dedup;

const REPO_URL: &str = "https://github.com/open-telemetry/opentelemetry-rust-contrib";

#[derive(Debug, Clone)]
pub struct OtelRustAdapter {
    source: RepoSource,
}

impl OtelRustAdapter {
    #[must_use]
    pub const fn new(fetcher: GitFetcher) -> Self {
        Self {
            source: RepoSource::new(fetcher, REPO_URL),
        }
    }
}

#[async_trait::async_trait]
impl Adapter for OtelRustAdapter {
    fn name(&self) -> &'static str {
        "otel-rust"
    }

    fn source_category(&self) -> SourceCategory {
        SourceCategory::InstrumentationLibrary
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
        let walker = SourceWalker::new(root).extensions(&["rs"]).skip_dirs(&["target", "tests", "benches"]);
        let files = scan(ctx, root, walker, extract_meter_calls).await?;

        let metrics = to_raw_metrics(self, files, |file| {
            let crate_dir = file.relative.split('/').next().unwrap_or_default();
            (ComponentType::Instrumentation, crate_component(crate_dir))
        });

        Ok(dedup(metrics))
    }
}

/// `opentelemetry-instrumentation-actix-web` becomes `actix-web`.
fn crate_component(crate_dir: &str) -> String {
    let name = crate_dir
        .strip_prefix("opentelemetry-instrumentation-")
        .or_else(|| crate_dir.strip_prefix("opentelemetry-"))
        .unwrap_or(crate_dir);
    name.to_lowercase()
}

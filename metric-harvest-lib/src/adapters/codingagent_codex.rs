//! OpenAI Codex CLI telemetry

use super::repo::{RepoSource, require_file, snapshot_root, to_raw_metrics};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::extract::{SourceWalker, extract_str_constants, scan};
use crate::fetch::GitFetcher;
use crate::model::{ComponentType, Confidence, ExtractionMethod, FetchResult, RawMetric, SourceCategory};
use std::path::Path;

const REPO_URL: &str = "https://github.com/openai/codex";
const NAMES_FILE: &str = "codex-rs/otel/src/metrics/names.rs";
const COMPONENT: &str = "codex";

#[derive(Debug, Clone)]
pub struct CodexAdapter {
    source: RepoSource,
}

impl CodexAdapter {
    #[must_use]
    pub const fn new(fetcher: GitFetcher) -> Self {
        Self {
            source: RepoSource::new(fetcher, REPO_URL),
        }
    }
}

#[async_trait::async_trait]
impl Adapter for CodexAdapter {
    fn name(&self) -> &'static str {
        "codingagent-codex"
    }

    fn source_category(&self) -> SourceCategory {
        SourceCategory::CodingAgent
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
        let names = require_file(root, NAMES_FILE)?;

        let walker = SourceWalker::new(names.parent().unwrap_or(Path::new(".")))
            .file_names(&["names.rs"])
            .shallow();
        let files = scan(ctx, root, walker, extract_str_constants).await?;

        Ok(to_raw_metrics(self, files, |_| (ComponentType::Platform, COMPONENT.to_string())))
    }
}

//! Google Gemini CLI telemetry

use super::repo::{RepoSource, require_dir, snapshot_root, to_raw_metrics};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::extract::{SourceWalker, extract_ts_meter_calls, scan};
use crate::fetch::GitFetcher;
use crate::model::{ComponentType, Confidence, ExtractionMethod, FetchResult, RawMetric, SourceCategory};

const REPO_URL: &str = "https://github.com/google-gemini/gemini-cli";
const TELEMETRY_DIR: &str = "packages/core/src/telemetry";
const COMPONENT: &str = "gemini-cli";

#[derive(Debug, Clone)]
pub struct GeminiAdapter {
    source: RepoSource,
}

impl GeminiAdapter {
    #[must_use]
    pub const fn new(fetcher: GitFetcher) -> Self {
        Self {
            source: RepoSource::new(fetcher, REPO_URL),
        }
    }
}

#[async_trait::async_trait]
impl Adapter for GeminiAdapter {
    fn name(&self) -> &'static str {
        "codingagent-gemini"
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
        let telemetry = require_dir(root, TELEMETRY_DIR)?;

        let walker = SourceWalker::new(telemetry)
            .extensions(&["ts"])
            .skip_suffixes(&[".test.ts", ".spec.ts"])
            .shallow();
        let files = scan(ctx, root, walker, extract_ts_meter_calls).await?;

        Ok(to_raw_metrics(self, files, |_| (ComponentType::Platform, COMPONENT.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::InstrumentType;
    use chrono::Utc;
    use std::fs;

    const METRICS_TS: &str = r"
export function initializeMetrics(meter: Meter) {
  sessionCounter = meter.createCounter('gemini_cli.session.count', {
    description: 'Count of CLI sessions started.',
    valueType: ValueType.INT,
  });
  apiRequestLatency = meter.createHistogram('gemini_cli.api.request.latency', {
    description: 'Latency of API requests in milliseconds.',
    unit: 'ms',
    valueType: ValueType.INT,
  });
}
";

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_extract_telemetry_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        let telemetry = root.join(TELEMETRY_DIR);
        fs::create_dir_all(telemetry.join("clearcut")).unwrap();
        fs::write(telemetry.join("metrics.ts"), METRICS_TS).unwrap();
        fs::write(telemetry.join("metrics.test.ts"), METRICS_TS).unwrap();
        fs::write(telemetry.join("clearcut/logger.ts"), METRICS_TS).unwrap();

        let snapshot = FetchResult::repository(root, "f00d", Utc::now());
        let metrics = GeminiAdapter::new(GitFetcher::new("unused-cache"))
            .extract(&Context::new(), &snapshot)
            .await
            .unwrap();

        assert_eq!(metrics.len(), 2);

        let sessions = &metrics[0];
        assert_eq!(sessions.name, "gemini_cli.session.count");
        assert_eq!(sessions.instrument_type, InstrumentType::Counter);
        assert_eq!(sessions.unit, "count");
        assert_eq!(sessions.description, "Count of CLI sessions started.");
        assert_eq!(sessions.component_name, "gemini-cli");

        let latency = &metrics[1];
        assert_eq!(latency.instrument_type, InstrumentType::Histogram);
        assert_eq!(latency.unit, "ms");
        assert_eq!(latency.path, "packages/core/src/telemetry/metrics.ts");
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_missing_telemetry_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let snapshot = FetchResult::repository(temp_dir.path(), "f00d", Utc::now());
        let err = GeminiAdapter::new(GitFetcher::new("unused-cache"))
            .extract(&Context::new(), &snapshot)
            .await
            .unwrap_err();
        assert_eq!(ErrorKind::of(&err), ErrorKind::NotFound);
    }
}

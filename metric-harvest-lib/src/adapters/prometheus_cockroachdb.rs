//! CockroachDB metric metadata

use super::repo::{RepoSource, require_dir, snapshot_root, to_raw_metrics};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::extract::{CompositeExtractor, SourceWalker, scan};
use crate::fetch::GitFetcher;
use crate::model::{ComponentType, Confidence, ExtractionMethod, FetchResult, RawMetric, SourceCategory};
use std::collections::HashSet;

const REPO_URL: &str = "https://github.com/cockroachdb/cockroach";
const PKG_DIR: &str = "pkg";
const COMPONENT: &str = "cockroachdb";

const EXTRACTOR: CompositeExtractor = CompositeExtractor::new(&["metric.Metadata"]);

#[derive(Debug, Clone)]
pub struct CockroachdbAdapter {
    source: RepoSource,
}

impl CockroachdbAdapter {
    #[must_use]
    pub const fn new(fetcher: GitFetcher) -> Self {
        Self {
            source: RepoSource::new(fetcher, REPO_URL),
        }
    }
}

#[async_trait::async_trait]
impl Adapter for CockroachdbAdapter {
    fn name(&self) -> &'static str {
        "prometheus-cockroachdb"
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
        let pkg = require_dir(root, PKG_DIR)?;

        let walker = SourceWalker::new(pkg).extensions(&["go"]).skip_suffixes(&["_test.go"]);
        let files = scan(ctx, root, walker, |source: &str| EXTRACTOR.extract(source)).await?;

        // Metadata is often shared between packages; the first declaration wins.
        let mut seen = HashSet::new();
        let mut metrics = to_raw_metrics(self, files, |_| (ComponentType::Platform, COMPONENT.to_string()));
        metrics.retain(|m| seen.insert(m.name.clone()));

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InstrumentType;
    use chrono::Utc;
    use std::fs;
    use std::path::Path;

    const KV: &str = r#"
package kvserver

var (
    metaReplicaCount = metric.Metadata{
        Name:        "replicas",
        Help:        "Number of replicas",
        Measurement: "Replicas",
        Unit:        metric.Unit_COUNT,
    }
    metaLiveBytes = metric.Metadata{
        Name: "livebytes",
        Help: "Number of bytes of live data (keys plus values)",
        Unit: metric.Unit_BYTES,
    }
)
"#;

    const SQL: &str = r#"
package sql

var (
    metaReplicaCountCopy = metric.Metadata{
        Name: "replicas",
        Help: "A later duplicate",
        Unit: metric.Unit_COUNT,
    }
    metaLatency = metric.Metadata{
        Name: "sql.exec.latency",
        Help: "Latency of SQL statement execution",
        Unit: metric.Unit_NANOSECONDS,
    }
)
"#;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_first_declaration_wins() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "pkg/kv/kvserver/metrics.go", KV);
        write(root, "pkg/sql/exec_metrics.go", SQL);
        write(root, "pkg/sql/exec_metrics_test.go", KV);

        let snapshot = FetchResult::repository(root, "d00d", Utc::now());
        let metrics = CockroachdbAdapter::new(GitFetcher::new("unused-cache"))
            .extract(&Context::new(), &snapshot)
            .await
            .unwrap();

        let names: Vec<_> = metrics.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["replicas", "livebytes", "sql.exec.latency"]);
        assert_eq!(metrics[0].description, "Number of replicas");
        assert_eq!(metrics[1].unit, "bytes");
        assert_eq!(metrics[2].unit, "nanoseconds");
        assert_eq!(metrics[2].instrument_type, InstrumentType::Histogram);
        assert!(metrics.iter().all(|m| m.component_name == "cockroachdb"));
    }
}

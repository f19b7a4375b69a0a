//! OpenTelemetry Collector contrib components

use super::repo::{RepoSource, snapshot_root, to_raw_metrics};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::error::HarvestError;
use crate::extract::{SourceWalker, extract_collector_metrics, scan};
use crate::fetch::GitFetcher;
use crate::model::{ComponentType, Confidence, ExtractionMethod, FetchResult, RawMetric, SourceCategory};
use ohno::IntoAppError;

const REPO_URL: &str = "https://github.com/open-telemetry/opentelemetry-collector-contrib";

/// Top-level directories holding one component per subdirectory.
const KINDS: &[(&str, ComponentType)] = &[
    ("receiver", ComponentType::Receiver),
    ("processor", ComponentType::Processor),
    ("exporter", ComponentType::Exporter),
    ("extension", ComponentType::Extension),
    ("connector", ComponentType::Connector),
];

#[derive(Debug, Clone)]
pub struct CollectorContribAdapter {
    source: RepoSource,
}

impl CollectorContribAdapter {
    #[must_use]
    pub const fn new(fetcher: GitFetcher) -> Self {
        Self {
            source: RepoSource::new(fetcher, REPO_URL),
        }
    }
}

#[async_trait::async_trait]
impl Adapter for CollectorContribAdapter {
    fn name(&self) -> &'static str {
        "otel-collector-contrib"
    }

    fn source_category(&self) -> SourceCategory {
        SourceCategory::InstrumentationLibrary
    }

    fn confidence(&self) -> Confidence {
        Confidence::Authoritative
    }

    fn extraction_method(&self) -> ExtractionMethod {
        ExtractionMethod::StructuredMetadata
    }

    fn repo_url(&self) -> &'static str {
        REPO_URL
    }

    async fn fetch(&self, ctx: &Context, options: &FetchOptions) -> Result<FetchResult> {
        self.source.fetch(ctx, options).await
    }

    async fn extract(&self, ctx: &Context, snapshot: &FetchResult) -> Result<Vec<RawMetric>> {
        let root = snapshot_root(snapshot)?;

        let present: Vec<_> = KINDS.iter().filter(|(dir, _)| root.join(dir).is_dir()).collect();
        if present.is_empty() {
            return Err(HarvestError::NotFound("collector component directories".to_string()))
                .into_app_err_with(|| format!("no receiver, processor, exporter, extension or connector directory in '{}'", root.display()));
        }

        let mut metrics = Vec::new();
        for &&(dir, component_type) in &present {
            let walker = SourceWalker::new(root.join(dir)).file_names(&["metadata.yaml"]).max_depth(2);
            let files = scan(ctx, root, walker, extract_collector_metrics).await?;

            metrics.extend(to_raw_metrics(self, files, |file| {
                let component = file
                    .path
                    .parent()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                (component_type, component)
            }));
        }

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::InstrumentType;
    use chrono::Utc;
    use std::fs;
    use std::path::Path;

    const REDIS: &str = r"
type: redis

attributes:
  role:
    description: Redis node's role
    type: string
    enum: [replica, primary]

metrics:
  redis.clients.connected:
    enabled: true
    description: Number of client connections (excluding connections from replicas)
    unit: '{client}'
    sum:
      value_type: int
      monotonic: false
      aggregation_temporality: cumulative
  redis.commands.processed:
    enabled: true
    description: Total number of commands processed by the server
    unit: '{command}'
    sum:
      value_type: int
      monotonic: true
    attributes: [role]
  redis.cpu.time:
    enabled: false
    description: System CPU consumed by the Redis server in seconds since server start
    unit: s
    gauge:
      value_type: double
";

    fn adapter() -> CollectorContribAdapter {
        CollectorContribAdapter::new(GitFetcher::new("unused-cache"))
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_extract_components() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "receiver/redisreceiver/metadata.yaml", REDIS);
        write(root, "receiver/redisreceiver/internal/metadata/generated.yaml", REDIS);
        write(root, "processor/batchprocessor/metadata.yaml", "type: batch\n");

        let snapshot = FetchResult::repository(root, "feedface", Utc::now());
        let metrics = adapter().extract(&Context::new(), &snapshot).await.unwrap();

        let names: Vec<_> = metrics.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["redis.clients.connected", "redis.commands.processed", "redis.cpu.time"]);

        assert!(metrics.iter().all(|m| m.component_name == "redisreceiver"));
        assert!(metrics.iter().all(|m| m.component_type == ComponentType::Receiver));
        assert!(metrics.iter().all(|m| m.path == "receiver/redisreceiver/metadata.yaml"));

        assert_eq!(metrics[0].instrument_type, InstrumentType::UpDownCounter);
        assert_eq!(metrics[1].instrument_type, InstrumentType::Counter);
        assert_eq!(metrics[1].attributes[0].name, "role");
        assert_eq!(metrics[1].attributes[0].description.as_deref(), Some("Redis node's role"));
        assert_eq!(metrics[2].instrument_type, InstrumentType::Gauge);
        assert!(!metrics[2].enabled_by_default);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_one_component_root_is_enough() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "connector/countconnector/metadata.yaml", "type: count\n");

        let snapshot = FetchResult::repository(temp_dir.path(), "feedface", Utc::now());
        let metrics = adapter().extract(&Context::new(), &snapshot).await.unwrap();
        assert!(metrics.is_empty());
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_no_component_roots_is_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let snapshot = FetchResult::repository(temp_dir.path(), "feedface", Utc::now());
        let err = adapter().extract(&Context::new(), &snapshot).await.unwrap_err();
        assert_eq!(ErrorKind::of(&err), ErrorKind::NotFound);
    }
}

//! OpenTelemetry semantic conventions

use super::repo::{RepoSource, require_dir, snapshot_root, to_raw_metrics};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::extract::{FileMetrics, SourceWalker, extract_semconv_metrics, parse_semconv, scan};
use crate::fetch::GitFetcher;
use crate::model::{ComponentType, Confidence, ExtractionMethod, FetchResult, RawMetric, SourceCategory};
use crate::normalize::SemconvConvention;
use std::path::Path;

const REPO_URL: &str = "https://github.com/open-telemetry/semantic-conventions";
const MODEL_DIR: &str = "model";

#[derive(Debug, Clone)]
pub struct SemconvAdapter {
    source: RepoSource,
}

impl SemconvAdapter {
    #[must_use]
    pub const fn new(fetcher: GitFetcher) -> Self {
        Self {
            source: RepoSource::new(fetcher, REPO_URL),
        }
    }

    /// The metric names and stability levels defined by the conventions.
    ///
    /// This is what an enricher matches harvested metrics against.
    pub async fn conventions(&self, ctx: &Context, snapshot: &FetchResult) -> Result<Vec<SemconvConvention>> {
        let root = snapshot_root(snapshot)?;
        let model = require_dir(root, MODEL_DIR)?;
        let files = scan(ctx, root, model_walker(&model), parse_semconv).await?;

        Ok(files
            .into_iter()
            .flat_map(|file| file.definitions)
            .map(|metric| SemconvConvention {
                name: metric.definition.name,
                stability: metric.stability,
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl Adapter for SemconvAdapter {
    fn name(&self) -> &'static str {
        "otel-semconv"
    }

    fn source_category(&self) -> SourceCategory {
        SourceCategory::Spec
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
        let model = require_dir(root, MODEL_DIR)?;
        let files = scan(ctx, root, model_walker(&model), extract_semconv_metrics).await?;

        Ok(to_raw_metrics(self, files, |file| {
            (ComponentType::Instrumentation, component_name(&model, file))
        }))
    }
}

fn model_walker(model: &Path) -> SourceWalker {
    SourceWalker::new(model).file_names(&["metrics.yaml"])
}

/// The directory of a file below `model/`, dotted; files directly in `model/` are `general`.
fn component_name(model: &Path, file: &FileMetrics) -> String {
    let dir = file
        .path
        .parent()
        .and_then(|parent| parent.strip_prefix(model).ok())
        .map(|rel| rel.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("."))
        .unwrap_or_default();

    if dir.is_empty() { "general".to_string() } else { dir }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::InstrumentType;
    use chrono::Utc;
    use std::fs;

    const HTTP: &str = r"
groups:
  - id: metric.http.server.request.duration
    type: metric
    metric_name: http.server.request.duration
    stability: stable
    brief: Duration of HTTP server requests.
    instrument: histogram
    unit: s
    attributes:
      - ref: http.request.method
        requirement_level: required
      - ref: url.scheme
        requirement_level:
          conditionally_required: if available
  - id: registry.http
    type: attribute_group
    brief: Not a metric.
";

    const NESTED: &str = r"
groups:
  - id: metric.db.client.connection.count
    type: metric
    metric_name: db.client.connection.count
    stability: development
    brief: Number of connections.
    instrument: updowncounter
    unit: '{connection}'
";

    fn adapter() -> SemconvAdapter {
        SemconvAdapter::new(GitFetcher::new("unused-cache"))
    }

    fn snapshot(root: &Path) -> FetchResult {
        FetchResult::repository(root, "0123abcd", Utc::now())
    }

    fn write_model(root: &Path) {
        fs::create_dir_all(root.join("model/http")).unwrap();
        fs::create_dir_all(root.join("model/db/client")).unwrap();
        fs::write(root.join("model/http/metrics.yaml"), HTTP).unwrap();
        fs::write(root.join("model/http/registry.yaml"), "groups: []").unwrap();
        fs::write(root.join("model/db/client/metrics.yaml"), NESTED).unwrap();
        fs::write(root.join("model/metrics.yaml"), "").unwrap();
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_extract_model_tree() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_model(temp_dir.path());

        let mut metrics = adapter().extract(&Context::new(), &snapshot(temp_dir.path())).await.unwrap();
        metrics.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(metrics.len(), 2);

        let db = &metrics[0];
        assert_eq!(db.name, "db.client.connection.count");
        assert_eq!(db.component_name, "db.client");
        assert_eq!(db.instrument_type, InstrumentType::UpDownCounter);
        assert_eq!(db.path, "model/db/client/metrics.yaml");

        let http = &metrics[1];
        assert_eq!(http.name, "http.server.request.duration");
        assert_eq!(http.component_name, "http");
        assert_eq!(http.unit, "s");
        assert_eq!(http.instrument_type, InstrumentType::Histogram);
        assert_eq!(http.attributes[0].name, "http.request.method");
        assert_eq!(http.attributes[0].kind, "string");
        assert_eq!(http.attributes[0].required, Some(true));
        assert_eq!(http.attributes[1].required, Some(false));
        assert_eq!(http.source_category, SourceCategory::Spec);
        assert_eq!(http.component_type, ComponentType::Instrumentation);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_conventions_carry_stability() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_model(temp_dir.path());

        let mut conventions = adapter().conventions(&Context::new(), &snapshot(temp_dir.path())).await.unwrap();
        conventions.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            conventions,
            vec![
                SemconvConvention {
                    name: "db.client.connection.count".to_string(),
                    stability: Some("development".to_string()),
                },
                SemconvConvention {
                    name: "http.server.request.duration".to_string(),
                    stability: Some("stable".to_string()),
                },
            ]
        );
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_missing_model_dir_is_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = adapter().extract(&Context::new(), &snapshot(temp_dir.path())).await.unwrap_err();
        assert_eq!(ErrorKind::of(&err), ErrorKind::NotFound);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_general_component_for_top_level_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join("model")).unwrap();
        fs::write(temp_dir.path().join("model/metrics.yaml"), NESTED).unwrap();

        let metrics = adapter().extract(&Context::new(), &snapshot(temp_dir.path())).await.unwrap();
        assert_eq!(metrics[0].component_name, "general");
    }
}

//! OpenTelemetry Java instrumentation

use super::repo::{RepoSource, require_dir, snapshot_root, to_raw_metrics};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::extract::{SourceWalker, extract_java_builders, relative_path, scan};
use crate::fetch::GitFetcher;
use crate::model::{ComponentType, Confidence, ExtractionMethod, FetchResult, RawMetric, SourceCategory};
use crate::normalize::dedup;
use std::path::Path;

const REPO_URL: &str = "https://github.com/open-telemetry/opentelemetry-java-instrumentation";
const INSTRUMENTATION_DIR: &str = "instrumentation";
const API_DIR: &str = "instrumentation-api-incubator";

#[derive(Debug, Clone)]
pub struct OtelJavaAdapter {
    source: RepoSource,
}

impl OtelJavaAdapter {
    #[must_use]
    pub const fn new(fetcher: GitFetcher) -> Self {
        Self {
            source: RepoSource::new(fetcher, REPO_URL),
        }
    }
}

#[async_trait::async_trait]
impl Adapter for OtelJavaAdapter {
    fn name(&self) -> &'static str {
        "otel-java"
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
        let instrumentation = require_dir(root, INSTRUMENTATION_DIR)?;

        let files = scan(ctx, root, java_walker(&instrumentation), extract_java_builders).await?;
        let mut metrics = to_raw_metrics(self, files, |file| {
            (ComponentType::Instrumentation, library_component(&instrumentation, &file.path))
        });

        let api = root.join(API_DIR);
        if api.is_dir() {
            let files = scan(ctx, root, java_walker(&api), extract_java_builders).await?;
            metrics.extend(to_raw_metrics(self, files, |file| {
                (ComponentType::Instrumentation, api_component(&api, &file.path))
            }));
        }

        // The same instrument is often registered by several library versions.
        Ok(dedup(metrics))
    }
}

fn java_walker(dir: &Path) -> SourceWalker {
    SourceWalker::new(dir).extensions(&["java"]).skip_fragments(&["/test/", "/jmh/"])
}

/// The first directory below `instrumentation/`, such as `kafka` or `runtime-telemetry`.
fn library_component(instrumentation: &Path, file: &Path) -> String {
    let relative = relative_path(instrumentation, file);
    relative.split('/').next().unwrap_or_default().to_string()
}

/// `<area>-semconv` for files under a `semconv/<area>/` package, else `api`.
fn api_component(api: &Path, file: &Path) -> String {
    let relative = relative_path(api, file);
    let mut dirs: Vec<&str> = relative.split('/').collect();
    let _ = dirs.pop();

    dirs.iter()
        .rposition(|d| *d == "semconv")
        .and_then(|i| dirs.get(i + 1))
        .map_or_else(|| "api".to_string(), |area| format!("{area}-semconv"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::InstrumentType;
    use chrono::Utc;
    use std::fs;

    const KAFKA: &str = r#"
final class KafkaConsumerMetrics {
  static void register(Meter meter) {
    meter.counterBuilder("kafka.consumer.records_consumed").setUnit("{record}").build();
  }
}
"#;

    const KAFKA_OLD: &str = r#"
final class KafkaConsumerMetrics {
  static void register(Meter meter) {
    meter.counterBuilder("kafka.consumer.records_consumed")
        .setDescription("Records consumed")
        .setUnit("{record}")
        .build();
  }
}
"#;

    const DB_POOL: &str = r#"
public final class DbConnectionPoolMetrics {
  DbConnectionPoolMetrics(Meter meter) {
    usage = meter.upDownCounterBuilder("db.client.connections.usage").setUnit("{connection}").build();
  }
}
"#;

    const HTTP_API: &str = r#"
public final class HttpMetricsUtil {
  static void create(Meter meter) {
    meter.histogramBuilder("http.client.request.body.size").setUnit("By").build();
  }
}
"#;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn adapter() -> OtelJavaAdapter {
        OtelJavaAdapter::new(GitFetcher::new("unused-cache"))
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_extract_library_and_api_metrics() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "instrumentation/kafka/kafka-clients-2.6/src/main/java/KafkaConsumerMetrics.java", KAFKA);
        write(root, "instrumentation/kafka/kafka-clients-0.11/src/main/java/KafkaConsumerMetrics.java", KAFKA_OLD);
        write(root, "instrumentation/kafka/kafka-clients-2.6/src/test/java/Fake.java", DB_POOL);
        write(root, "instrumentation/jmh/src/jmh/java/Bench.java", DB_POOL);
        write(
            root,
            "instrumentation-api-incubator/src/main/java/io/opentelemetry/semconv/db/DbConnectionPoolMetrics.java",
            DB_POOL,
        );
        write(root, "instrumentation-api-incubator/src/main/java/io/opentelemetry/http/HttpMetricsUtil.java", HTTP_API);

        let snapshot = FetchResult::repository(root, "cafe", Utc::now());
        let mut metrics = adapter().extract(&Context::new(), &snapshot).await.unwrap();
        metrics.sort_by(|a, b| a.name.cmp(&b.name));

        let summary: Vec<_> = metrics.iter().map(|m| (m.name.as_str(), m.component_name.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                ("db.client.connections.usage", "db-semconv"),
                ("http.client.request.body.size", "api"),
                ("kafka.consumer.records_consumed", "kafka"),
            ]
        );

        let kafka = &metrics[2];
        assert_eq!(kafka.description, "Records consumed");
        assert_eq!(kafka.instrument_type, InstrumentType::Counter);
        assert_eq!(kafka.confidence, Confidence::Derived);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_api_dir_is_optional() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "instrumentation/kafka/src/main/java/A.java", KAFKA);

        let snapshot = FetchResult::repository(temp_dir.path(), "cafe", Utc::now());
        let metrics = adapter().extract(&Context::new(), &snapshot).await.unwrap();
        assert_eq!(metrics.len(), 1);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_instrumentation_dir_is_required() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "instrumentation-api-incubator/src/main/java/A.java", KAFKA);

        let snapshot = FetchResult::repository(temp_dir.path(), "cafe", Utc::now());
        let err = adapter().extract(&Context::new(), &snapshot).await.unwrap_err();
        assert_eq!(ErrorKind::of(&err), ErrorKind::NotFound);
    }

    #[test]
    fn test_api_component() {
        let api = Path::new("/r/api");
        assert_eq!(api_component(api, &api.join("x/semconv/http/A.java")), "http-semconv");
        assert_eq!(api_component(api, &api.join("x/semconv/A.java")), "api");
        assert_eq!(api_component(api, &api.join("x/A.java")), "api");
    }
}

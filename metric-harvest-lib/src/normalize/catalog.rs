use super::dedup::MetricRecord;
use crate::Result;
use crate::model::{FetchResult, RawMetric, SourceCategory};
use chrono::{DateTime, Utc};
use ohno::bail;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use strum::{Display, EnumString};

/// How a catalog entry relates to the OpenTelemetry semantic conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SemconvMatch {
    Exact,
    Prefix,
    None,
}

/// A harvested metric together with where and when it was harvested.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogEntry {
    pub id: String,

    #[serde(flatten)]
    pub metric: RawMetric,

    pub adapter: String,
    pub repo: String,
    pub commit: String,
    pub extracted_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semconv_match: Option<SemconvMatch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semconv_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semconv_stability: Option<String>,
}

impl CatalogEntry {
    #[must_use]
    pub fn new(metric: RawMetric, adapter: &str, repo: &str, snapshot: &FetchResult) -> Self {
        Self {
            id: catalog_id(metric.source_category, adapter, &metric.component_name, &metric.name),
            metric,
            adapter: adapter.to_string(),
            repo: repo.to_string(),
            commit: snapshot.commit.clone(),
            extracted_at: snapshot.timestamp,
            semconv_match: None,
            semconv_name: None,
            semconv_stability: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.metric.name.is_empty() {
            bail!("catalog entry {} has an empty metric name", self.id);
        }

        if self.metric.component_name.is_empty() {
            bail!("metric '{}' has an empty component name", self.metric.name);
        }

        if self.adapter.is_empty() {
            bail!("metric '{}' has an empty adapter name", self.metric.name);
        }

        Ok(())
    }
}

impl MetricRecord for CatalogEntry {
    fn metric(&self) -> &RawMetric {
        &self.metric
    }
}

/// Stable identifier of a catalog entry: the first 16 bytes of a SHA-256 digest, in hex.
#[must_use]
pub fn catalog_id(category: SourceCategory, adapter: &str, component: &str, name: &str) -> String {
    let digest = Sha256::digest(format!("{category}:{adapter}:{component}:{name}").as_bytes());
    hex::encode(digest.get(..16).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentType, Confidence, ExtractionMethod, InstrumentType};
    use chrono::TimeZone;

    fn metric(name: &str, component: &str) -> RawMetric {
        RawMetric {
            name: name.to_string(),
            description: String::new(),
            unit: "count".to_string(),
            instrument_type: InstrumentType::Counter,
            attributes: Vec::new(),
            enabled_by_default: true,
            component_type: ComponentType::Platform,
            component_name: component.to_string(),
            source_location: "AWS/Lambda".to_string(),
            path: String::new(),
            source_category: SourceCategory::CloudPlatform,
            confidence: Confidence::Documented,
            extraction_method: ExtractionMethod::Scraped,
        }
    }

    fn snapshot() -> FetchResult {
        FetchResult::documentation(Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap())
    }

    #[test]
    fn test_id_shape() {
        let id = catalog_id(SourceCategory::CloudPlatform, "cloudwatch-lambda", "Lambda", "Invocations");
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_id_is_stable_and_distinct() {
        let a = catalog_id(SourceCategory::Exporter, "prometheus-kafka", "kafka", "kafka_brokers");
        let b = catalog_id(SourceCategory::Exporter, "prometheus-kafka", "kafka", "kafka_brokers");
        let c = catalog_id(SourceCategory::Exporter, "prometheus-kafka", "kafka", "kafka_topic_partitions");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_new_copies_snapshot_provenance() {
        let entry = CatalogEntry::new(metric("Invocations", "Lambda"), "cloudwatch-lambda", "", &snapshot());
        assert_eq!(entry.commit, "2026-03-14");
        assert_eq!(entry.adapter, "cloudwatch-lambda");
        assert_eq!(
            entry.id,
            catalog_id(SourceCategory::CloudPlatform, "cloudwatch-lambda", "Lambda", "Invocations")
        );
        entry.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let snap = snapshot();
        assert!(CatalogEntry::new(metric("", "Lambda"), "a", "", &snap).validate().is_err());
        assert!(CatalogEntry::new(metric("m", ""), "a", "", &snap).validate().is_err());
        assert!(CatalogEntry::new(metric("m", "c"), "", "", &snap).validate().is_err());
    }

    #[test]
    fn test_serialized_entry_is_flat() {
        let entry = CatalogEntry::new(metric("Errors", "Lambda"), "cloudwatch-lambda", "", &snapshot());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["name"], "Errors");
        assert_eq!(json["component_name"], "Lambda");
        assert_eq!(json["source_category"], "cloud-platform");
        assert!(json.get("metric").is_none());
        assert!(json.get("semconv_match").is_none());
    }
}

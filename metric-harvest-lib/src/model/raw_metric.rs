use super::{ComponentType, Confidence, ExtractionMethod, InstrumentType, SourceCategory};
use serde::{Deserialize, Serialize};

/// A label a metric may carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Attribute {
    pub name: String,

    /// Simple kind identifier such as `string` or `int`
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Attribute {
    /// A string-typed attribute with no further metadata.
    #[must_use]
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: "string".to_string(),
            required: None,
            description: None,
        }
    }

    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }
}

/// The canonical output record.
///
/// Values are constructed once during extraction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct RawMetric {
    pub name: String,
    pub description: String,
    pub unit: String,
    pub instrument_type: InstrumentType,
    pub attributes: Vec<Attribute>,
    pub enabled_by_default: bool,
    pub component_type: ComponentType,
    pub component_name: String,
    pub source_location: String,
    pub path: String,
    pub source_category: SourceCategory,
    pub confidence: Confidence,
    pub extraction_method: ExtractionMethod,
}

/// An intermediate record produced by an extractor, before provenance is attached.
///
/// Fields left as `None` were not stated upstream and are filled by the inference
/// heuristics during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetricDefinition {
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub instrument_type: Option<InstrumentType>,
    pub attributes: Vec<Attribute>,
    pub enabled_by_default: Option<bool>,
}

impl MetricDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub const fn with_instrument_type(mut self, instrument_type: InstrumentType) -> Self {
        self.instrument_type = Some(instrument_type);
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    #[must_use]
    pub const fn with_enabled_by_default(mut self, enabled: bool) -> Self {
        self.enabled_by_default = Some(enabled);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_serializes_kind_as_type() {
        let attr = Attribute::string("cpu");
        let json = serde_json::to_value(&attr).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "cpu", "type": "string" }));
    }

    #[test]
    fn test_attribute_with_required() {
        let attr = Attribute::string("http.request.method").with_required(true);
        assert_eq!(attr.required, Some(true));
        let json = serde_json::to_value(&attr).unwrap();
        assert_eq!(json["required"], serde_json::json!(true));
    }

    #[test]
    fn test_metric_definition_builders() {
        let def = MetricDefinition::new("x")
            .with_description("d")
            .with_unit("s")
            .with_instrument_type(InstrumentType::Histogram)
            .with_enabled_by_default(false);

        assert_eq!(def.name, "x");
        assert_eq!(def.description.as_deref(), Some("d"));
        assert_eq!(def.unit.as_deref(), Some("s"));
        assert_eq!(def.instrument_type, Some(InstrumentType::Histogram));
        assert_eq!(def.enabled_by_default, Some(false));
        assert!(def.attributes.is_empty());
    }

    #[test]
    fn test_raw_metric_field_names() {
        let metric = RawMetric {
            name: "m".into(),
            description: String::new(),
            unit: "count".into(),
            instrument_type: InstrumentType::UpDownCounter,
            attributes: vec![],
            enabled_by_default: true,
            component_type: ComponentType::Platform,
            component_name: "c".into(),
            source_location: String::new(),
            path: String::new(),
            source_category: SourceCategory::CloudPlatform,
            confidence: Confidence::Documented,
            extraction_method: ExtractionMethod::Scraped,
        };

        let json = serde_json::to_value(&metric).unwrap();
        assert_eq!(json["instrument_type"], "up-down-counter");
        assert_eq!(json["component_type"], "platform");
        assert_eq!(json["source_category"], "cloud-platform");
        assert_eq!(json["confidence"], "documented");
        assert_eq!(json["extraction_method"], "scraped");
        assert_eq!(json["enabled_by_default"], true);
    }
}

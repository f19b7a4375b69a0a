use crate::Result;
use crate::model::{Attribute, InstrumentType, MetricDefinition};
use ohno::IntoAppError;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct Metadata {
    #[serde(default)]
    attributes: BTreeMap<String, AttributeSpec>,
    #[serde(default)]
    metrics: BTreeMap<String, MetricSpec>,
}

#[derive(Debug, Deserialize)]
struct AttributeSpec {
    description: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MetricSpec {
    enabled: Option<bool>,
    description: Option<String>,
    unit: Option<String>,
    sum: Option<SumSpec>,
    gauge: Option<serde_yaml::Value>,
    histogram: Option<serde_yaml::Value>,
    #[serde(default)]
    attributes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SumSpec {
    #[serde(default)]
    monotonic: bool,
}

impl MetricSpec {
    fn instrument_type(&self) -> InstrumentType {
        match (&self.sum, &self.gauge, &self.histogram) {
            (Some(sum), _, _) if sum.monotonic => InstrumentType::Counter,
            (Some(_), _, _) => InstrumentType::UpDownCounter,
            (None, Some(_), _) => InstrumentType::Gauge,
            (None, None, Some(_)) => InstrumentType::Histogram,
            (None, None, None) => InstrumentType::Gauge,
        }
    }
}

/// Extract the metrics of a collector component's `metadata.yaml`, sorted by name.
pub fn extract_collector_metrics(source: &str) -> Result<Vec<MetricDefinition>> {
    if source.trim().is_empty() {
        return Ok(Vec::new());
    }

    let metadata: Metadata = serde_yaml::from_str(source).into_app_err("parsing collector metadata")?;

    Ok(metadata
        .metrics
        .iter()
        .map(|(name, spec)| {
            let attributes = spec
                .attributes
                .iter()
                .map(|attr_name| {
                    let known = metadata.attributes.get(attr_name);
                    Attribute {
                        name: attr_name.clone(),
                        kind: known
                            .and_then(|a| a.kind.clone())
                            .unwrap_or_else(|| "string".to_string()),
                        required: None,
                        description: known.and_then(|a| a.description.clone()),
                    }
                })
                .collect();

            let mut def = MetricDefinition::new(name.as_str())
                .with_instrument_type(spec.instrument_type())
                .with_attributes(attributes);
            def.description = spec.description.clone();
            def.unit = spec.unit.clone();
            def.enabled_by_default = spec.enabled;
            def
        })
        .collect())
}

use crate::Result;
use crate::model::{Attribute, InstrumentType, MetricDefinition};
use ohno::IntoAppError;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct SemconvFile {
    #[serde(default)]
    groups: Vec<Group>,
}

#[derive(Debug, Deserialize)]
struct Group {
    #[serde(default, rename = "type")]
    kind: String,
    metric_name: Option<String>,
    brief: Option<String>,
    instrument: Option<String>,
    unit: Option<String>,
    stability: Option<String>,
    #[serde(default)]
    attributes: Vec<AttributeRef>,
}

#[derive(Debug, Deserialize)]
struct AttributeRef {
    #[serde(rename = "ref")]
    reference: Option<String>,
    requirement_level: Option<RequirementLevel>,
}

/// Either `required` or a single-key mapping such as `conditionally_required: <condition>`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequirementLevel {
    Level(String),
    Qualified(BTreeMap<String, serde_yaml::Value>),
}

impl RequirementLevel {
    fn level(&self) -> Option<&str> {
        match self {
            Self::Level(level) => Some(level.as_str()),
            Self::Qualified(map) => map.keys().next().map(String::as_str),
        }
    }
}

/// A metric group from a semantic-convention file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemconvMetric {
    pub definition: MetricDefinition,
    pub stability: Option<String>,
}

/// Parse the `metric` groups of a semantic-convention YAML document.
pub fn parse_semconv(source: &str) -> Result<Vec<SemconvMetric>> {
    if source.trim().is_empty() {
        return Ok(Vec::new());
    }

    let file: SemconvFile = serde_yaml::from_str(source).into_app_err("parsing semantic-convention YAML")?;

    Ok(file
        .groups
        .into_iter()
        .filter(|group| group.kind == "metric")
        .filter_map(|group| {
            let name = group.metric_name.filter(|n| !n.is_empty())?;

            let attributes = group
                .attributes
                .into_iter()
                .filter_map(|attr| {
                    let required = attr.requirement_level.as_ref().and_then(RequirementLevel::level) == Some("required");
                    attr.reference.map(|name| Attribute::string(name).with_required(required))
                })
                .collect();

            let instrument_type = group.instrument.as_deref().map_or(InstrumentType::Gauge, InstrumentType::from_keyword);

            let mut definition = MetricDefinition::new(name)
                .with_instrument_type(instrument_type)
                .with_attributes(attributes);
            definition.description = group.brief.map(|b| b.trim().to_string());
            definition.unit = group.unit;

            Some(SemconvMetric {
                definition,
                stability: group.stability,
            })
        })
        .collect())
}

pub fn extract_semconv_metrics(source: &str) -> Result<Vec<MetricDefinition>> {
    Ok(parse_semconv(source)?.into_iter().map(|m| m.definition).collect())
}

use super::go_syntax::{named_children, parse_go, selector_name, string_slice, string_value, text, unwrap_element, visit};
use crate::Result;
use crate::model::{Attribute, InstrumentType, MetricDefinition};
use tree_sitter::Node;

/// Recognizes metric metadata written as Go composite literals.
///
/// A composite qualifies when its type is one of the configured names, or, if enabled,
/// when it is untyped but carries both a `name` and a `valueType` field.
#[derive(Debug, Clone, Copy)]
pub struct CompositeExtractor {
    type_names: &'static [&'static str],
    match_untyped: bool,
}

impl CompositeExtractor {
    #[must_use]
    pub const fn new(type_names: &'static [&'static str]) -> Self {
        Self {
            type_names,
            match_untyped: false,
        }
    }

    #[must_use]
    pub const fn with_untyped(mut self) -> Self {
        self.match_untyped = true;
        self
    }

    pub fn extract(&self, source: &str) -> Result<Vec<MetricDefinition>> {
        let tree = parse_go(source)?;
        let mut definitions = Vec::new();

        visit(tree.root_node(), |node| {
            let body = match node.kind() {
                "composite_literal" => node
                    .child_by_field_name("type")
                    .filter(|ty| self.type_names.contains(&text(*ty, source)))
                    .and_then(|_| node.child_by_field_name("body")),
                "literal_value" if self.match_untyped && node.parent().is_none_or(|p| p.kind() != "composite_literal") => {
                    Some(node).filter(|body| has_untyped_metric_fields(*body, source))
                }
                _ => None,
            };

            if let Some(def) = body.and_then(|body| definition_from_fields(body, source)) {
                definitions.push(def);
            }
        });

        Ok(definitions)
    }
}

/// Map a Prometheus value type selector to an instrument type.
#[must_use]
pub fn value_type_instrument(selector: &str) -> Option<InstrumentType> {
    match selector {
        "CounterValue" => Some(InstrumentType::Counter),
        "GaugeValue" | "UntypedValue" => Some(InstrumentType::Gauge),
        _ => None,
    }
}

/// Map a `metric.Unit_*` selector to a unit name.
#[must_use]
pub fn metadata_unit(selector: &str) -> Option<&'static str> {
    match selector {
        "Unit_BYTES" => Some("bytes"),
        "Unit_COUNT" => Some("count"),
        "Unit_NANOSECONDS" | "Unit_TIMESTAMP_NS" => Some("nanoseconds"),
        "Unit_SECONDS" | "Unit_TIMESTAMP_SEC" => Some("seconds"),
        "Unit_PERCENT" => Some("percent"),
        _ => None,
    }
}

fn keyed_fields<'t>(body: Node<'t>, source: &str) -> Vec<(String, Node<'t>)> {
    named_children(body)
        .into_iter()
        .filter(|element| element.kind() == "keyed_element")
        .filter_map(|element| {
            let mut parts = named_children(element).into_iter().map(unwrap_element);
            let key = parts.next()?;
            let value = parts.next()?;
            matches!(key.kind(), "identifier" | "field_identifier").then(|| (text(key, source).to_string(), value))
        })
        .collect()
}

fn has_untyped_metric_fields(body: Node<'_>, source: &str) -> bool {
    let fields = keyed_fields(body, source);
    fields.iter().any(|(key, _)| key == "name") && fields.iter().any(|(key, _)| key == "valueType")
}

fn definition_from_fields(body: Node<'_>, source: &str) -> Option<MetricDefinition> {
    let mut def = MetricDefinition::default();

    for (key, value) in keyed_fields(body, source) {
        match key.as_str() {
            "Name" | "name" => def.name = string_value(value, source).unwrap_or_default(),
            "Help" | "help" => def.description = string_value(value, source),
            "Unit" => def.unit = selector_name(value, source).and_then(metadata_unit).map(str::to_string),
            "valueType" => def.instrument_type = selector_name(value, source).and_then(value_type_instrument),
            "extraLabels" => {
                def.attributes = string_slice(value, source)
                    .unwrap_or_default()
                    .into_iter()
                    .map(Attribute::string)
                    .collect();
            }
            _ => {}
        }
    }

    (!def.name.is_empty()).then_some(def)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CADVISOR: &str = r#"
package metrics

import "github.com/prometheus/client_golang/prometheus"

func NewPrometheusCollector() {
    c.containerMetrics = append(c.containerMetrics, []containerMetric{
        {
            name:        "container_cpu_usage_seconds_total",
            help:        "Cumulative cpu time consumed in seconds.",
            valueType:   prometheus.CounterValue,
            extraLabels: []string{"cpu"},
        },
        {
            name:      "container_memory_usage_bytes",
            help:      "Current memory usage in bytes, " + "including all memory.",
            valueType: prometheus.GaugeValue,
        },
    }...)

    m := machineMetric{
        name:      "machine_cpu_cores",
        help:      "Number of logical CPU cores.",
        valueType: prometheus.UntypedValue,
    }
    _ = m

    other := struct{ name string }{name: "not_a_metric"}
    _ = other
}
"#;

    const COCKROACH: &str = r#"
package kvserver

import "github.com/cockroachdb/cockroach/pkg/util/metric"

var (
    metaRangeCount = metric.Metadata{
        Name:        "ranges",
        Help:        "Number of ranges",
        Measurement: "Ranges",
        Unit:        metric.Unit_COUNT,
    }
    metaLiveBytes = metric.Metadata{
        Name: "livebytes",
        Help: "Number of bytes of live data",
        Unit: metric.Unit_BYTES,
    }
    metaOdd = metric.Metadata{
        Name: "odd.unit",
        Unit: metric.Unit_CONST,
    }
    metaUnnamed = metric.Metadata{
        Help: "no name",
    }
)
"#;

    fn cadvisor() -> CompositeExtractor {
        CompositeExtractor::new(&["containerMetric", "machineMetric"]).with_untyped()
    }

    #[test]
    fn test_cadvisor_composites() {
        let defs = cadvisor().extract(CADVISOR).unwrap();
        let names: Vec<_> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["container_cpu_usage_seconds_total", "container_memory_usage_bytes", "machine_cpu_cores"]
        );

        assert_eq!(defs[0].instrument_type, Some(InstrumentType::Counter));
        assert_eq!(defs[0].description.as_deref(), Some("Cumulative cpu time consumed in seconds."));
        assert_eq!(defs[0].attributes, vec![Attribute::string("cpu")]);

        assert_eq!(defs[1].instrument_type, Some(InstrumentType::Gauge));
        assert_eq!(
            defs[1].description.as_deref(),
            Some("Current memory usage in bytes, including all memory.")
        );

        assert_eq!(defs[2].instrument_type, Some(InstrumentType::Gauge));
    }

    #[test]
    fn test_metadata_composites() {
        let defs = CompositeExtractor::new(&["metric.Metadata"]).extract(COCKROACH).unwrap();
        assert_eq!(defs.len(), 3);
        assert_eq!(defs[0].name, "ranges");
        assert_eq!(defs[0].unit.as_deref(), Some("count"));
        assert_eq!(defs[1].unit.as_deref(), Some("bytes"));
        assert_eq!(defs[2].unit, None);
        assert!(defs.iter().all(|d| d.instrument_type.is_none()));
    }

    #[test]
    fn test_untyped_matching_is_opt_in() {
        let defs = CompositeExtractor::new(&["metric.Metadata"]).extract(CADVISOR).unwrap();
        assert!(defs.is_empty());
    }

    #[test]
    fn test_empty_and_broken_sources() {
        assert!(cadvisor().extract("").unwrap().is_empty());
        let _ = cadvisor().extract("package metrics\nvar x = containerMetric{").unwrap_err();
    }

    #[test]
    fn test_unit_table() {
        assert_eq!(metadata_unit("Unit_NANOSECONDS"), Some("nanoseconds"));
        assert_eq!(metadata_unit("Unit_TIMESTAMP_SEC"), Some("seconds"));
        assert_eq!(metadata_unit("Unit_PERCENT"), Some("percent"));
        assert_eq!(metadata_unit("Unit_UNKNOWN"), None);
    }
}

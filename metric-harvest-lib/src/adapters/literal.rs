use super::Adapter;
use crate::model::{Attribute, ComponentType, InstrumentType, MetricDefinition, RawMetric};
use crate::normalize::{Provenance, normalize};

/// A metric transcribed from published documentation.
#[derive(Debug)]
pub struct LiteralMetric {
    pub name: &'static str,
    pub description: &'static str,
    pub unit: &'static str,
    pub instrument_type: InstrumentType,

    /// String-typed labels
    pub attributes: &'static [&'static str],
}

macro_rules! metric_literal {
    ($name:expr, $description:expr, $unit:expr, $kind:ident) => {
        metric_literal!($name, $description, $unit, $kind, [])
    };
    ($name:expr, $description:expr, $unit:expr, $kind:ident, [$($attribute:expr),* $(,)?]) => {
        LiteralMetric {
            name: $name,
            description: $description,
            unit: $unit,
            instrument_type: InstrumentType::$kind,
            attributes: &[$($attribute),*],
        }
    };
}

pub(super) use metric_literal;

/// Where a literal table's metrics live on the platform.
#[derive(Debug, Clone, Copy)]
pub struct LiteralComponent {
    pub component_name: &'static str,
    pub source_location: &'static str,
}

/// Turn grouped literal tables into records, in table order.
pub fn literal_metrics(adapter: &dyn Adapter, component: LiteralComponent, groups: &[&[LiteralMetric]]) -> Vec<RawMetric> {
    let provenance = Provenance {
        source_category: adapter.source_category(),
        confidence: adapter.confidence(),
        extraction_method: adapter.extraction_method(),
        component_type: ComponentType::Platform,
        component_name: component.component_name.to_string(),
        source_location: component.source_location.to_string(),
        path: String::new(),
    };

    groups
        .iter()
        .flat_map(|group| group.iter())
        .map(|literal| {
            let def = MetricDefinition::new(literal.name)
                .with_description(literal.description)
                .with_unit(literal.unit)
                .with_instrument_type(literal.instrument_type)
                .with_attributes(literal.attributes.iter().copied().map(Attribute::string).collect());
            normalize(def, &provenance)
        })
        .collect()
}

//! Turning extracted definitions into catalog records
//!
//! An extractor produces [`MetricDefinition`] values that only carry what the upstream
//! source states. [`normalize`] fills the gaps with the heuristics of [`infer`] and stamps
//! each record with the [`Provenance`] of the adapter that produced it.

mod catalog;
mod dedup;
mod enrich;
mod infer;

pub use catalog::{CatalogEntry, SemconvMatch, catalog_id};
pub use dedup::{MetricRecord, dedup};
pub use enrich::{SemconvConvention, SemconvEnricher};
pub use infer::{DEFAULT_UNIT, infer_instrument_type, infer_unit};

use crate::model::{ComponentType, Confidence, ExtractionMethod, MetricDefinition, RawMetric, SourceCategory};

/// Adapter-level constants plus where in the snapshot a definition was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub source_category: SourceCategory,
    pub confidence: Confidence,
    pub extraction_method: ExtractionMethod,
    pub component_type: ComponentType,
    pub component_name: String,
    pub source_location: String,
    pub path: String,
}

/// Build the canonical record for a definition.
///
/// A stated instrument type always wins over name-based inference. An empty stated unit
/// counts as not stated.
#[must_use]
pub fn normalize(def: MetricDefinition, provenance: &Provenance) -> RawMetric {
    let instrument_type = def
        .instrument_type
        .unwrap_or_else(|| infer_instrument_type(&def.name));

    let unit = match def.unit {
        Some(unit) if !unit.is_empty() => unit,
        _ => infer_unit(&def.name).to_string(),
    };

    RawMetric {
        description: def.description.unwrap_or_default(),
        unit,
        instrument_type,
        attributes: def.attributes,
        enabled_by_default: def.enabled_by_default.unwrap_or(true),
        component_type: provenance.component_type,
        component_name: provenance.component_name.clone(),
        source_location: provenance.source_location.clone(),
        path: provenance.path.clone(),
        source_category: provenance.source_category,
        confidence: provenance.confidence,
        extraction_method: provenance.extraction_method,
        name: def.name,
    }
}

//! The uniform record types produced by the harvester
//!
//! Every adapter, whatever its input shape, ends up producing [`RawMetric`] values.
//! Extractors produce the looser [`MetricDefinition`] first; adapters then stamp
//! provenance onto each definition to form the final record.
//!
//! # Vocabularies
//!
//! The enums in this module are part of the output compatibility surface. Their string
//! forms (as produced by `serde` and `Display`) are what downstream tools match on, so
//! they must never change spelling.

mod fetch_result;
mod raw_metric;
mod vocabulary;

pub use fetch_result::FetchResult;
pub use raw_metric::{Attribute, MetricDefinition, RawMetric};
pub use vocabulary::{ComponentType, Confidence, ExtractionMethod, InstrumentType, SourceCategory};

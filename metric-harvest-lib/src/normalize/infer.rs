//! Name-based inference of instrument type and unit
//!
//! These rules only depend on the metric name, so every extractor that falls back to
//! them agrees on the result for the same name.

use crate::model::InstrumentType;

const HISTOGRAM_SUFFIXES: &[&str] = &["_bucket", "_ms", ".latency", ".duration", "_duration"];
const COUNTER_SUFFIXES: &[&str] = &["_total", "_sum", "_count", ".count"];
const MILLISECOND_SUFFIXES: &[&str] = &["_ms", ".duration_ms"];

/// Unit reported when nothing better is known.
pub const DEFAULT_UNIT: &str = "count";

/// Infer an instrument type from a metric name.
///
/// Histogram patterns are checked before counter patterns so that latency sums such as
/// `rpc_latency_seconds_sum` are classified as histograms.
#[must_use]
pub fn infer_instrument_type(name: &str) -> InstrumentType {
    if HISTOGRAM_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
        || (name.ends_with("_seconds_sum") && name.contains("latency"))
    {
        return InstrumentType::Histogram;
    }

    if COUNTER_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
        return InstrumentType::Counter;
    }

    InstrumentType::Gauge
}

/// Infer a unit from a metric name.
#[must_use]
pub fn infer_unit(name: &str) -> &'static str {
    if MILLISECOND_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
        "ms"
    } else {
        DEFAULT_UNIT
    }
}

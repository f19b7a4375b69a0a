//! ClickHouse declares its server metrics in C++ X-macro lists and in assignments to an
//! asynchronous-metrics map. Both are matched textually.

use crate::Result;
use crate::model::{InstrumentType, MetricDefinition};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static CURRENT_METRIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"M\((\w+),\s*"([^"]+)"\)"#).expect("invalid regex"));

static PROFILE_EVENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"M\((\w+),\s*"([^"]+)",\s*ValueType::(\w+)\)"#).expect("invalid regex"));

static ASYNC_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"new_values\["(\w+)"\]"#).expect("invalid regex"));

static ASYNC_DESCRIPTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"new_values\["(\w+)"\]\s*=\s*\{[^}]*?"([^"]+)"\s*\}"#).expect("invalid regex"));

/// `M(Name, "description")` entries of `CurrentMetrics.cpp`, exported as gauges.
pub fn extract_current_metrics(source: &str) -> Result<Vec<MetricDefinition>> {
    Ok(CURRENT_METRIC_REGEX
        .captures_iter(source)
        .map(|caps| {
            MetricDefinition::new(format!("ClickHouseMetrics_{}", &caps[1]))
                .with_description(&caps[2])
                .with_instrument_type(InstrumentType::Gauge)
        })
        .collect())
}

/// `M(Name, "description", ValueType::Kind)` entries of `ProfileEvents.cpp`, exported as counters.
pub fn extract_profile_events(source: &str) -> Result<Vec<MetricDefinition>> {
    Ok(PROFILE_EVENT_REGEX
        .captures_iter(source)
        .map(|caps| {
            let def = MetricDefinition::new(format!("ClickHouseProfileEvents_{}", &caps[1]))
                .with_description(&caps[2])
                .with_instrument_type(InstrumentType::Counter);

            match value_type_unit(&caps[3]) {
                Some(unit) => def.with_unit(unit),
                None => def,
            }
        })
        .collect())
}

/// Statically named `new_values["Name"]` assignments, exported as gauges.
///
/// The description is the last string literal of the first `new_values["Name"] = { …, "…" }`
/// assignment. Names that are only read have none.
pub fn extract_async_metrics(source: &str) -> Result<Vec<MetricDefinition>> {
    let mut descriptions: HashMap<&str, &str> = HashMap::new();
    for caps in ASYNC_DESCRIPTION_REGEX.captures_iter(source) {
        if let (Some(name), Some(description)) = (caps.get(1), caps.get(2)) {
            let _ = descriptions.entry(name.as_str()).or_insert(description.as_str());
        }
    }

    let mut seen = HashSet::new();
    Ok(ASYNC_NAME_REGEX
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str())
        .filter(|name| seen.insert(*name))
        .map(|name| {
            let def = MetricDefinition::new(format!("ClickHouseAsyncMetrics_{name}")).with_instrument_type(InstrumentType::Gauge);
            match descriptions.get(name) {
                Some(description) => def.with_description(*description),
                None => def,
            }
        })
        .collect())
}

fn value_type_unit(value_type: &str) -> Option<&'static str> {
    match value_type {
        "Bytes" => Some("bytes"),
        "Microseconds" => Some("microseconds"),
        "Milliseconds" => Some("milliseconds"),
        "Nanoseconds" => Some("nanoseconds"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT_METRICS: &str = r#"
#define APPLY_FOR_BUILTIN_METRICS(M) \
    M(Query, "Number of executing queries") \
    M(Merge, "Number of executing background merges") \
    M(MemoryTracking, "Total amount of memory (bytes) allocated by the server.")
"#;

    const PROFILE_EVENTS: &str = r#"
#define APPLY_FOR_BUILTIN_EVENTS(M) \
    M(Query, "Number of queries to be interpreted.", ValueType::Number) \
    M(ReadBufferFromFileDescriptorReadBytes, "Number of bytes read from file descriptors.", ValueType::Bytes) \
    M(QueryTimeMicroseconds, "Total time of all queries.", ValueType::Microseconds)
"#;

    const ASYNC_METRICS: &str = r#"
void ServerAsynchronousMetrics::updateImpl(TimePoint update_time, TimePoint current_time)
{
    new_values["Uptime"] = { getContext()->getUptimeSeconds(),
        "The server uptime in seconds." };
    new_values["NumberOfDatabases"] = { number_of_databases, "Total number of databases on the server." };
    new_values["Uptime"] = { 0, "Repeated." };
    new_values[fmt::format("CPUFrequencyMHz_{}", core)] = { value, "Dynamic." };
    auto jemalloc = new_values["jemalloc.epoch"];
    new_values["MarkCacheBytes"] = { mark_cache->sizeInBytes(), "Total size of mark cache in bytes" };
}
"#;

    #[test]
    fn test_current_metrics() {
        let defs = extract_current_metrics(CURRENT_METRICS).unwrap();
        let names: Vec<_> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["ClickHouseMetrics_Query", "ClickHouseMetrics_Merge", "ClickHouseMetrics_MemoryTracking"]
        );
        assert_eq!(defs[0].description.as_deref(), Some("Number of executing queries"));
        assert!(defs.iter().all(|d| d.instrument_type == Some(InstrumentType::Gauge)));
    }

    #[test]
    fn test_current_metrics_ignore_profile_events() {
        assert!(extract_current_metrics(PROFILE_EVENTS).unwrap().is_empty());
    }

    #[test]
    fn test_profile_event_units() {
        let defs = extract_profile_events(PROFILE_EVENTS).unwrap();
        let units: Vec<_> = defs.iter().map(|d| (d.name.as_str(), d.unit.as_deref())).collect();
        assert_eq!(
            units,
            vec![
                ("ClickHouseProfileEvents_Query", None),
                ("ClickHouseProfileEvents_ReadBufferFromFileDescriptorReadBytes", Some("bytes")),
                ("ClickHouseProfileEvents_QueryTimeMicroseconds", Some("microseconds")),
            ]
        );
        assert!(defs.iter().all(|d| d.instrument_type == Some(InstrumentType::Counter)));
    }

    #[test]
    fn test_async_metrics() {
        let defs = extract_async_metrics(ASYNC_METRICS).unwrap();
        let found: Vec<_> = defs.iter().map(|d| (d.name.as_str(), d.description.as_deref())).collect();
        assert_eq!(
            found,
            vec![
                ("ClickHouseAsyncMetrics_Uptime", Some("The server uptime in seconds.")),
                (
                    "ClickHouseAsyncMetrics_NumberOfDatabases",
                    Some("Total number of databases on the server.")
                ),
                ("ClickHouseAsyncMetrics_MarkCacheBytes", Some("Total size of mark cache in bytes")),
            ]
        );
    }
}

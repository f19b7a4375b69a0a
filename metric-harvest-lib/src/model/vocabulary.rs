use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The kind of measurement a metric records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum InstrumentType {
    /// Monotonic running total
    Counter,

    /// Non-monotonic running sum
    UpDownCounter,

    /// Instantaneous value
    #[default]
    Gauge,

    /// Distribution of values
    Histogram,
}

impl InstrumentType {
    /// Map an OpenTelemetry-style instrument keyword (`counter`, `updowncounter`, `gauge`, `histogram`).
    ///
    /// Unknown or empty keywords fall back to [`InstrumentType::Gauge`].
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim() {
            "counter" => Self::Counter,
            "updowncounter" | "up_down_counter" | "up-down-counter" | "upDownCounter" => Self::UpDownCounter,
            "histogram" => Self::Histogram,
            _ => Self::Gauge,
        }
    }
}

/// Whether a metric belongs to a running system or to a library emitting it.
///
/// The collector kinds are used by sources that are themselves collector components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ComponentType {
    Platform,
    Instrumentation,
    Receiver,
    Processor,
    Exporter,
    Extension,
    Connector,
}

/// Broad origin class of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SourceCategory {
    /// Specification repositories
    Spec,

    /// Instrumentation libraries and auto-instrumentation agents
    InstrumentationLibrary,

    /// Standalone exporters that expose a system's metrics
    Exporter,

    /// Managed services of a cloud provider
    CloudPlatform,

    /// AI coding agents
    CodingAgent,

    /// Container runtimes and their monitoring agents
    ContainerRuntime,
}

/// How trustworthy an extraction is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Confidence {
    /// Read from canonical source code or a specification
    Authoritative,

    /// Recovered with imperfect heuristics
    Derived,

    /// Transcribed from published documentation
    Documented,
}

/// How records were recovered from their source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ExtractionMethod {
    /// Parsing the structure of source code
    Syntactic,

    /// Reading a declarative specification
    StructuredMetadata,

    /// Compiled in from documentation
    Scraped,
}

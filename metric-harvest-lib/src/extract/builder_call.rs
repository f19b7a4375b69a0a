//! Metric instruments created through meter builder calls
//!
//! Two surface syntaxes are recognized: the Java builder chain
//! `meter.counterBuilder("name").setDescription("…").setUnit("…").build()` and the
//! TypeScript factory call `meter.createCounter('name', { description, unit })`.

use crate::Result;
use crate::model::{InstrumentType, MetricDefinition};
use crate::normalize::DEFAULT_UNIT;
use regex::Regex;
use std::sync::LazyLock;

/// Upper bound on how far past a builder call sibling metadata is searched for.
const CHAIN_WINDOW: usize = 2_000;

/// Window searched for the options object of a TypeScript factory call.
const OPTIONS_WINDOW: usize = 200;

static JAVA_BUILDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"meter\s*\.\s*(counter|histogram|gauge|upDownCounter)Builder\s*\(\s*"([^"]+)""#).expect("invalid regex")
});
static JAVA_BUILD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.build(?:Observer|WithCallback)?\s*\(").expect("invalid regex"));
static JAVA_DESCRIPTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\.setDescription\s*\(\s*(?:"([^"]*)"|'([^']*)')"#).expect("invalid regex"));
static JAVA_UNIT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\.setUnit\s*\(\s*(?:"([^"]*)"|'([^']*)')"#).expect("invalid regex"));

static TS_CREATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"meter\.create(Counter|Histogram)\(\s*['"]([^'"]+)['"]"#).expect("invalid regex"));
static TS_DESCRIPTION_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"description:\s*['"]([^'"]+)['"]"#).expect("invalid regex"));
static TS_UNIT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"unit:\s*['"]([^'"]+)['"]"#).expect("invalid regex"));

/// Extract Java `meter.<kind>Builder("name")` chains.
pub fn extract_java_builders(source: &str) -> Result<Vec<MetricDefinition>> {
    let mut definitions = Vec::new();

    for caps in JAVA_BUILDER_REGEX.captures_iter(source) {
        let (Some(call), Some(kind), Some(name)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };

        let instrument_type = match kind.as_str() {
            "counter" => InstrumentType::Counter,
            "histogram" => InstrumentType::Histogram,
            "upDownCounter" => InstrumentType::UpDownCounter,
            _ => InstrumentType::Gauge,
        };

        let chain = source.get(call.start()..find_chain_end(source, name.end())).unwrap_or_default();

        let mut def = MetricDefinition::new(name.as_str())
            .with_instrument_type(instrument_type)
            .with_unit(first_quoted(&JAVA_UNIT_REGEX, chain).unwrap_or(DEFAULT_UNIT));
        def.description = first_quoted(&JAVA_DESCRIPTION_REGEX, chain).map(str::to_string);
        definitions.push(def);
    }

    Ok(definitions)
}

/// Extract TypeScript `meter.createCounter/createHistogram('name', {…})` calls.
pub fn extract_ts_meter_calls(source: &str) -> Result<Vec<MetricDefinition>> {
    let mut definitions = Vec::new();

    for caps in TS_CREATE_REGEX.captures_iter(source) {
        let (Some(call), Some(kind), Some(name)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };

        let instrument_type = if kind.as_str() == "Histogram" {
            InstrumentType::Histogram
        } else {
            InstrumentType::Counter
        };

        let options = window(source, call.end(), OPTIONS_WINDOW);
        let capture = |regex: &Regex| regex.captures(options).and_then(|c| c.get(1)).map(|m| m.as_str());

        let mut def = MetricDefinition::new(name.as_str())
            .with_instrument_type(instrument_type)
            .with_unit(capture(&TS_UNIT_REGEX).unwrap_or(DEFAULT_UNIT));
        def.description = capture(&TS_DESCRIPTION_REGEX).map(str::to_string);
        definitions.push(def);
    }

    Ok(definitions)
}

/// Find the end of the builder chain starting at `start`.
///
/// The chain ends after the parentheses of the next `build…()` call, or failing that at
/// the next `;` or member declaration. The search never extends beyond [`CHAIN_WINDOW`].
fn find_chain_end(source: &str, start: usize) -> usize {
    let remaining = window(source, start, CHAIN_WINDOW);
    let limit = start + remaining.len();

    if let Some(build) = JAVA_BUILD_REGEX.find(remaining)
        && let Some(end) = matching_paren(source, start + build.end() - 1, limit)
    {
        return end;
    }

    let boundary = [remaining.find(';'), remaining.find("public"), remaining.find("private")]
        .into_iter()
        .flatten()
        .min();

    boundary.map_or(limit, |offset| start + offset)
}

/// Given the index of an opening parenthesis, return the index just past its match.
fn matching_paren(source: &str, open: usize, limit: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    if bytes.get(open) != Some(&b'(') {
        return None;
    }

    let mut depth = 1_usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().take(limit).skip(open + 1) {
        if escaped {
            escaped = false;
            continue;
        }

        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'(' if !in_string => depth += 1,
            b')' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

/// Up to `len` bytes of `source` starting at `start`, cut at a character boundary.
fn window(source: &str, start: usize, len: usize) -> &str {
    let mut end = (start + len).min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }

    source.get(start..end).unwrap_or_default()
}

fn first_quoted<'s>(regex: &Regex, text: &'s str) -> Option<&'s str> {
    let caps = regex.captures(text)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str().trim())
}

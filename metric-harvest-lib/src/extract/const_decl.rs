use crate::Result;
use crate::model::MetricDefinition;
use regex::Regex;
use std::sync::LazyLock;

static CONST_STR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"pub\s+const\s+\w+:\s*&str\s*=\s*"([^"]+)""#).expect("invalid regex"));

/// Extract metric names declared as `pub const NAME: &str = "…";`.
///
/// Type and unit are left to the inference rules. The description is derived from the
/// name.
pub fn extract_str_constants(source: &str) -> Result<Vec<MetricDefinition>> {
    Ok(CONST_STR_REGEX
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|name| MetricDefinition::new(name.as_str()).with_description(describe_name(name.as_str())))
        .collect())
}

/// Title-case everything after the first dot, turning `_` and `.` into spaces.
///
/// Names without a dot describe themselves.
#[must_use]
pub fn describe_name(name: &str) -> String {
    let Some((_, rest)) = name.split_once('.') else {
        return name.to_string();
    };

    rest.split(['.', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

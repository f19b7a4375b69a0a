use super::catalog::{CatalogEntry, SemconvMatch};
use std::collections::BTreeMap;

/// One metric from the OpenTelemetry semantic conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemconvConvention {
    pub name: String,
    pub stability: Option<String>,
}

/// Annotates catalog entries with their closest semantic-convention metric.
#[derive(Debug, Clone, Default)]
pub struct SemconvEnricher {
    /// Keyed by the dot-normalized name; the value keeps the published name.
    conventions: BTreeMap<String, (String, Option<String>)>,
}

fn normalize(name: &str) -> String {
    name.replace('_', ".")
}

impl SemconvEnricher {
    pub fn new(conventions: impl IntoIterator<Item = SemconvConvention>) -> Self {
        Self {
            conventions: conventions
                .into_iter()
                .map(|c| (normalize(&c.name), (c.name, c.stability)))
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.conventions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conventions.is_empty()
    }

    /// Find the convention a metric name corresponds to.
    ///
    /// Underscores are treated as dots on both sides. Among prefix matches the longest convention wins.
    #[must_use]
    pub fn lookup(&self, name: &str) -> (SemconvMatch, Option<(&str, Option<&str>)>) {
        let normalized = normalize(name);

        if let Some((name, stability)) = self.conventions.get(&normalized) {
            return (SemconvMatch::Exact, Some((name.as_str(), stability.as_deref())));
        }

        let best = self
            .conventions
            .iter()
            .filter(|(convention, _)| {
                normalized
                    .strip_prefix(convention.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
            })
            .max_by_key(|(convention, _)| convention.len());

        match best {
            Some((_, (name, stability))) => (SemconvMatch::Prefix, Some((name.as_str(), stability.as_deref()))),
            None => (SemconvMatch::None, None),
        }
    }

    pub fn enrich(&self, entry: &mut CatalogEntry) {
        let (matched, convention) = self.lookup(&entry.metric.name);
        entry.semconv_match = Some(matched);
        entry.semconv_name = convention.map(|(name, _)| name.to_string());
        entry.semconv_stability = convention.and_then(|(_, stability)| stability.map(str::to_string));
    }

    pub fn enrich_all<'a>(&self, entries: impl IntoIterator<Item = &'a mut CatalogEntry>) {
        for entry in entries {
            self.enrich(entry);
        }
    }
}

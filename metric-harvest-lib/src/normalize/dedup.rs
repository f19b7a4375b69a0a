use crate::model::RawMetric;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Anything that wraps a [`RawMetric`] and can therefore be deduplicated.
pub trait MetricRecord {
    fn metric(&self) -> &RawMetric;
}

impl MetricRecord for RawMetric {
    fn metric(&self) -> &Self {
        self
    }
}

/// Merge records sharing `(name, component_name)`.
///
/// The first record for a key wins unless it has an empty description and a later one
/// does not, in which case the later record replaces it whole. Output keeps the position
/// of the first occurrence of each key.
pub fn dedup<T: MetricRecord>(records: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut result: Vec<T> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for record in records {
        let metric = record.metric();
        match index.entry((metric.name.clone(), metric.component_name.clone())) {
            Entry::Vacant(slot) => {
                let _ = slot.insert(result.len());
                result.push(record);
            }
            Entry::Occupied(slot) => {
                if let Some(existing) = result.get_mut(*slot.get())
                    && existing.metric().description.is_empty()
                    && !record.metric().description.is_empty()
                {
                    *existing = record;
                }
            }
        }
    }

    result
}

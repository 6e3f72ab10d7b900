use crate::models::{GroupMean, Observation};
use std::collections::BTreeMap;

/// Running sum of the non-missing values seen for one group
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    pub(crate) fn push(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.sum += value;
            self.count += 1;
        }
    }

    /// `None` when every value in the group was missing
    pub(crate) fn finish(&self) -> Option<GroupMean> {
        (self.count > 0).then(|| GroupMean {
            mean: self.sum / self.count as f64,
            count: self.count,
        })
    }
}

/// Mean of `value` per `key`. Groups whose values are all missing are left out.
pub(crate) fn grouped_mean<'a, K, I, F, V>(rows: I, key: F, value: V) -> BTreeMap<K, GroupMean>
where
    K: Ord,
    I: IntoIterator<Item = &'a Observation>,
    F: Fn(&'a Observation) -> K,
    V: Fn(&'a Observation) -> Option<f64>,
{
    let mut groups: BTreeMap<K, MeanAccumulator> = BTreeMap::new();
    for row in rows {
        groups.entry(key(row)).or_default().push(value(row));
    }

    groups
        .into_iter()
        .filter_map(|(k, acc)| acc.finish().map(|mean| (k, mean)))
        .collect()
}

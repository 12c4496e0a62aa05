//! Transforms over string-keyed map values.

use crate::pipeline::Pipeline;
use std::collections::{HashMap, HashSet};

impl<V: Send + 'static> Pipeline<HashMap<String, V>> {
    /// Keeps only the listed keys.
    #[must_use]
    pub fn pick(self, keys: &[&str]) -> Self {
        let keys: HashSet<String> = keys.iter().map(|k| (*k).to_string()).collect();
        self.pipe(move |mut map| {
            map.retain(|key, _| keys.contains(key));
            map
        })
    }

    /// Drops the listed keys.
    #[must_use]
    pub fn omit(self, keys: &[&str]) -> Self {
        let keys: HashSet<String> = keys.iter().map(|k| (*k).to_string()).collect();
        self.pipe(move |mut map| {
            map.retain(|key, _| !keys.contains(key));
            map
        })
    }

    /// Replaces the map with its keys. Order is unspecified.
    #[must_use]
    pub fn keys(self) -> Pipeline<Vec<String>> {
        self.pipe(|map| map.into_keys().collect())
    }

    /// Replaces the map with its values. Order is unspecified.
    #[must_use]
    pub fn values(self) -> Pipeline<Vec<V>> {
        self.pipe(|map| map.into_values().collect())
    }

    /// Replaces the map with its entries. Order is unspecified.
    #[must_use]
    pub fn entries(self) -> Pipeline<Vec<(String, V)>> {
        self.pipe(|map| map.into_iter().collect())
    }

    /// Merges `other` into the map; entries from `other` win on key
    /// conflicts.
    #[must_use]
    pub fn merge(self, other: HashMap<String, V>) -> Self
    where
        V: Clone + Sync,
    {
        self.pipe(move |mut map| {
            for (key, value) in &other {
                map.insert(key.clone(), value.clone());
            }
            map
        })
    }
}

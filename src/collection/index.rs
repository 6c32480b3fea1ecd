use std::collections::{BTreeMap, BTreeSet};

/// Reverse index from a relation or name to the positions of the entries that
/// carry it.
///
/// Each entry is recorded under both its `rel` and its `name`, so one position
/// may be reachable through two keys. Empty strings are keys like any other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index(BTreeMap<String, Vec<usize>>);

impl Index {
    /// Indexes `(rel, name)` pairs; the position of a pair is its place in the iterator.
    pub fn build<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut index = Index::default();
        for (position, (rel, name)) in entries.into_iter().enumerate() {
            index.insert(rel, position);
            index.insert(name, position);
        }
        index
    }

    fn insert(&mut self, key: &str, position: usize) {
        self.0.entry(key.to_string()).or_default().push(position);
    }

    /// Positions reachable from every key that contains all of `filters` as
    /// substrings, deduplicated and in ascending order.
    ///
    /// With no filters every key survives, so every indexed position is
    /// returned. Positions are unioned across surviving keys.
    #[must_use]
    pub fn resolve(&self, filters: &[&str]) -> Vec<usize> {
        let positions: BTreeSet<usize> = self
            .0
            .iter()
            .filter(|(key, _)| filters.iter().all(|filter| key.contains(*filter)))
            .flat_map(|(_, positions)| positions.iter().copied())
            .collect();
        positions.into_iter().collect()
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    /// Positions recorded under exactly `key`, in insertion order.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[usize]> {
        self.0.get(key).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

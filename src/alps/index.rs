use crate::error::BuildError;
use std::collections::BTreeSet;

/// The closed set of descriptor ids visible in a subtree.
///
/// Only explicit, non-empty ids are recorded. Descriptors identified solely by
/// an href never collide with each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdIndex(BTreeSet<String>);

impl IdIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The index of a single node with no children yet.
    pub fn for_id(id: &str) -> Self {
        let mut ids = BTreeSet::new();
        if !id.is_empty() {
            ids.insert(id.to_string());
        }
        IdIndex(ids)
    }

    /// Unions `child` into `parent`, or reports the first id (in sorted order)
    /// that both already contain. Neither input is modified.
    pub fn merge(parent: &IdIndex, child: &IdIndex) -> Result<IdIndex, BuildError> {
        if let Some(id) = child.0.iter().find(|id| parent.0.contains(*id)) {
            log::debug!("identifier conflict on `{id}`");
            return Err(BuildError::IdentifierConflict { id: id.clone() });
        }
        let mut merged = parent.0.clone();
        merged.extend(child.0.iter().cloned());
        Ok(IdIndex(merged))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

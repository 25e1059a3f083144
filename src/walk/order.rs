//! Traversal order for keys and child containers

use clap::ValueEnum;

use crate::value::PropertySet;

/// Order in which a walk visits keys and children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Insertion order.
    #[default]
    None,
    /// Ordinal, case-sensitive ascending.
    Sorted,
}

impl SortOrder {
    /// Entries of `set` in this order.
    pub fn entries<'a, V>(self, set: &'a PropertySet<V>) -> Vec<(&'a str, &'a V)> {
        let mut entries: Vec<_> = set.iter().collect();
        if self == SortOrder::Sorted {
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        }
        entries
    }
}

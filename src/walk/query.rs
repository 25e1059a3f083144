//! Filtered walk used to display settings

use std::io;

use tracing::trace;

use crate::store::{Container, Locality, display_path};
use crate::value::{Kind, TypedValue};

use super::wildcard::Wildcard;

/// Which containers and values a query shows.
#[derive(Debug, Clone, Default)]
pub struct QueryFilter {
    /// Exact key, compared case-insensitively.
    pub value_key: Option<String>,
    pub value_pattern: Option<Wildcard>,
    pub container_pattern: Option<Wildcard>,
    /// `None` accepts every kind.
    pub kind: Option<Kind>,
    pub recurse: bool,
}

impl QueryFilter {
    /// True when some filter can hide values.
    fn narrows_values(&self) -> bool {
        self.value_key.is_some() || self.value_pattern.is_some() || self.kind.is_some()
    }

    fn accepts_key(&self, key: &str) -> bool {
        if let Some(wanted) = &self.value_key {
            if wanted.to_lowercase() != key.to_lowercase() {
                return false;
            }
        }
        self.value_pattern.as_ref().is_none_or(|w| w.is_match(key))
    }

    pub fn accepts_value(&self, key: &str, value: &TypedValue) -> bool {
        self.accepts_key(key) && self.kind.is_none_or(|kind| value.kind() == kind)
    }

    pub fn accepts_container(&self, name: &str) -> bool {
        self.container_pattern.as_ref().is_none_or(|w| w.is_match(name))
    }
}

/// Receives what a query walk decides to show.
pub trait QueryOutput {
    /// A container header, e.g. `LOCAL\people`.
    fn container(&mut self, path: &str) -> io::Result<()>;

    fn value(&mut self, key: &str, value: &TypedValue) -> io::Result<()>;

    /// Header line of a composite; its entries follow.
    fn composite(&mut self, key: &str) -> io::Result<()>;

    fn composite_entry(&mut self, key: &str, value: &TypedValue) -> io::Result<()>;
}

/// Walks a container tree applying a [`QueryFilter`].
pub struct QueryWalker<'a> {
    locality: Locality,
    filter: &'a QueryFilter,
}

impl<'a> QueryWalker<'a> {
    pub fn new(locality: Locality, filter: &'a QueryFilter) -> Self {
        Self { locality, filter }
    }

    /// Show `container` (found at `path` below the locality root) and, when
    /// recursing, its descendants. Returns the number of values shown.
    pub fn walk<O: QueryOutput>(&self, container: &Container, path: &str, out: &mut O) -> io::Result<usize> {
        let mut shown = 0;

        if self.filter.accepts_container(container.name()) {
            let mut header_pending = true;
            for (key, value) in container.values().iter() {
                if !self.filter.accepts_value(key, value) {
                    continue;
                }
                if header_pending {
                    out.container(&display_path(self.locality, path))?;
                    header_pending = false;
                }
                self.show_value(key, value, out)?;
                shown += 1;
            }
            if header_pending && !self.filter.narrows_values() {
                out.container(&display_path(self.locality, path))?;
            }
        } else {
            trace!(container = container.name(), "container filtered out");
        }

        if self.filter.recurse {
            for child in container.containers().values() {
                let child_path = format!("{}\\{}", path, child.name());
                shown += self.walk(child, &child_path, out)?;
            }
        }
        Ok(shown)
    }

    fn show_value<O: QueryOutput>(&self, key: &str, value: &TypedValue, out: &mut O) -> io::Result<()> {
        let Some(composite) = value.as_composite() else {
            return out.value(key, value);
        };
        out.composite(key)?;
        for (entry_key, entry) in composite.iter() {
            if self.filter.accepts_value(entry_key, entry) {
                out.composite_entry(entry_key, entry)?;
            }
        }
        Ok(())
    }
}

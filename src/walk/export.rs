//! Export walk: drives a [`SettingsWriter`] over a container tree

use std::io;

use tracing::debug;

use crate::store::{Container, Locality};
use crate::value::{Composite, PropertySet, TypedValue};
use crate::writer::SettingsWriter;

use super::order::SortOrder;

/// State of one export walk.
pub struct WalkContext<'w> {
    locality: Locality,
    order: SortOrder,
    writer: &'w mut dyn SettingsWriter,
}

/// A value contributes output unless it is an empty composite.
fn value_visible(value: &TypedValue) -> bool {
    value.as_composite().is_none_or(|c| !c.is_empty())
}

/// A container contributes output when it or a descendant has a visible value.
fn container_visible(container: &Container) -> bool {
    container.values().values().any(value_visible)
        || container.containers().values().any(container_visible)
}

impl<'w> WalkContext<'w> {
    pub fn new(locality: Locality, order: SortOrder, writer: &'w mut dyn SettingsWriter) -> Self {
        Self {
            locality,
            order,
            writer,
        }
    }

    /// Write a complete document for `root`: `Start`, the locality bracket
    /// around the tree, `End`.
    pub fn export(&mut self, root: &Container) -> io::Result<()> {
        debug!(locality = %self.locality, order = ?self.order, "export walk");
        self.writer.start()?;
        self.writer.start_containers(self.locality.name())?;
        self.walk_container(root, true)?;
        self.writer.end_containers()?;
        self.writer.end()?;
        self.writer.flush()
    }

    pub fn walk_container(&mut self, container: &Container, is_last: bool) -> io::Result<()> {
        if !container_visible(container) {
            return Ok(());
        }
        let children: Vec<&Container> = self
            .order
            .entries(container.containers())
            .into_iter()
            .map(|(_, child)| child)
            .filter(|child| container_visible(child))
            .collect();

        self.writer.start_container(container.name())?;
        self.walk_values(container.values(), children.is_empty())?;
        for (i, child) in children.iter().enumerate() {
            self.walk_container(child, i == children.len() - 1)?;
        }
        self.writer.end_container(is_last)
    }

    fn walk_values(&mut self, values: &PropertySet<TypedValue>, is_last: bool) -> io::Result<()> {
        let visible: Vec<(&str, &TypedValue)> = self
            .order
            .entries(values)
            .into_iter()
            .filter(|(_, value)| value_visible(value))
            .collect();
        if visible.is_empty() {
            return Ok(());
        }

        self.writer.start_values()?;
        for (i, (key, value)) in visible.iter().enumerate() {
            let last = i == visible.len() - 1;
            match value {
                TypedValue::Composite(composite) => self.walk_composite(key, composite, last)?,
                value => self.writer.write_value(key, value, last)?,
            }
        }
        self.writer.end_values(is_last)
    }

    fn walk_composite(&mut self, name: &str, composite: &Composite, is_last: bool) -> io::Result<()> {
        if composite.is_empty() {
            return Ok(());
        }
        let entries = self.order.entries(composite);
        self.writer.start_composite(name)?;
        for (i, (key, value)) in entries.iter().enumerate() {
            self.writer.write_value(key, value, i == entries.len() - 1)?;
        }
        self.writer.end_composite(is_last)
    }
}

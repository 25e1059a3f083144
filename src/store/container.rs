//! Settings containers

use crate::error::{AppDataError, Result};
use crate::value::{PropertySet, TypedValue};

/// A named node holding values and child containers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Container {
    name: String,
    values: PropertySet<TypedValue>,
    containers: PropertySet<Container>,
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn values(&self) -> &PropertySet<TypedValue> {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut PropertySet<TypedValue> {
        &mut self.values
    }

    pub fn containers(&self) -> &PropertySet<Container> {
        &self.containers
    }

    /// Builder-style value insertion.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<TypedValue>) -> Self {
        self.values.insert(key, value.into());
        self
    }

    /// Builder-style child insertion; replaces a child of the same name.
    pub fn with_child(mut self, child: Container) -> Self {
        self.add_child(child);
        self
    }

    pub fn add_child(&mut self, child: Container) {
        let name = child.name.clone();
        self.containers.insert(name, child);
    }

    /// True when neither this container nor any descendant holds a value.
    pub fn is_empty_tree(&self) -> bool {
        self.values.is_empty() && self.containers.values().all(Container::is_empty_tree)
    }

    /// Resolve a container below this one.
    pub fn find(&self, segments: &[String]) -> Option<&Container> {
        segments
            .iter()
            .try_fold(self, |node, name| node.containers.get(name))
    }

    pub fn find_mut(&mut self, segments: &[String]) -> Option<&mut Container> {
        let mut node = self;
        for name in segments {
            node = node.containers.get_mut(name)?;
        }
        Some(node)
    }

    /// Resolve a container, creating missing ones along the way.
    pub fn create_path(&mut self, segments: &[String]) -> &mut Container {
        let mut node = self;
        for name in segments {
            node = node
                .containers
                .get_or_insert_with(name, || Container::new(name.clone()));
        }
        node
    }

    /// Remove the container at `segments` with everything below it.
    pub fn delete_path(&mut self, segments: &[String]) -> Result<Container> {
        let Some((last, parents)) = segments.split_last() else {
            return Err(AppDataError::InvalidPath(String::new()));
        };
        self.find_mut(parents)
            .and_then(|parent| parent.containers.remove(last))
            .ok_or_else(|| AppDataError::not_found("Container path", segments.join("\\")))
    }

    /// Count descendant containers (excluding this one) and all values.
    pub fn count(&self) -> (u64, u64) {
        let mut containers = 0;
        let mut values = self.values.len() as u64;
        for child in self.containers.values() {
            let (c, v) = child.count();
            containers += c + 1;
            values += v;
        }
        (containers, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(path: &str) -> Vec<String> {
        path.split('\\').map(str::to_string).collect()
    }

    #[test]
    fn test_create_and_find_path() {
        let mut root = Container::new("Local");
        root.create_path(&segs("a\\b\\c"))
            .values_mut()
            .insert("k", TypedValue::Int32(1));
        let found = root.find(&segs("a\\b\\c")).unwrap();
        assert_eq!(found.name(), "c");
        assert_eq!(found.values().get("k"), Some(&TypedValue::Int32(1)));
        assert!(root.find(&segs("a\\x")).is_none());
    }

    #[test]
    fn test_create_path_reuses_existing() {
        let mut root = Container::new("Local").with_child(Container::new("a").with_value("v", true));
        root.create_path(&segs("a\\b"));
        let a = root.find(&segs("a")).unwrap();
        assert_eq!(a.values().len(), 1);
        assert_eq!(a.containers().len(), 1);
    }

    #[test]
    fn test_delete_path() {
        let mut root = Container::new("Local");
        root.create_path(&segs("a\\b"));
        let removed = root.delete_path(&segs("a\\b")).unwrap();
        assert_eq!(removed.name(), "b");
        assert!(matches!(
            root.delete_path(&segs("a\\b")),
            Err(AppDataError::NotFound { .. })
        ));
        assert!(matches!(root.delete_path(&[]), Err(AppDataError::InvalidPath(_))));
    }

    #[test]
    fn test_empty_tree_ignores_empty_descendants() {
        let mut root = Container::new("Local");
        root.create_path(&segs("a\\b"));
        assert!(root.is_empty_tree());
        root.create_path(&segs("a\\b"))
            .values_mut()
            .insert("x", TypedValue::Empty);
        assert!(!root.is_empty_tree());
    }

    #[test]
    fn test_count() {
        let root = Container::new("Local")
            .with_value("a", 1)
            .with_child(Container::new("c1").with_value("b", 2).with_child(Container::new("c2")));
        assert_eq!(root.count(), (2, 2));
    }
}

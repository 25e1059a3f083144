//! Test utilities for creating temporary application data stores.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::store::{ApplicationData, Container, Locality, StoreConfig};

/// A temporary store root holding packages for testing.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    /// Create a new empty store root.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Create a store root with one provisioned package.
    pub fn with_package(package: &str) -> Self {
        let store = Self::new();
        store.provision(package);
        store
    }

    /// Get the store root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> StoreConfig {
        StoreConfig::new(self.dir.path())
    }

    /// Provision a package, or open it when it already exists.
    pub fn provision(&self, package: &str) -> ApplicationData {
        ApplicationData::provision(&self.config(), package).expect("Failed to provision package")
    }

    /// Replace the settings tree of a locality.
    pub fn set_settings(&self, package: &str, locality: Locality, root: &Container) {
        self.provision(package)
            .save_settings(locality, root)
            .expect("Failed to save settings");
    }

    /// Add a file below a locality folder.
    ///
    /// Creates parent directories as needed.
    pub fn add_file(&self, package: &str, locality: Locality, path: &str, content: &str) -> PathBuf {
        let full_path = self.provision(package).folder(locality).join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

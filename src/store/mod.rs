//! Application data store
//!
//! Packages live as directories under a store root. Each holds one folder
//! per locality plus JSON-persisted settings trees for the local and
//! roaming localities.
//!
//! # Module Structure
//!
//! - `locality` - localities and `ROOT\container` paths
//! - `container` - the in-memory settings tree
//! - `codec` - persisted form of settings trees
//! - `folder` - locality folder scanning
//! - `package` - per-package store operations

mod codec;
mod container;
mod folder;
mod locality;
mod package;

use std::path::{Path, PathBuf};

pub use container::Container;
pub use folder::{FolderEntry, scan};
pub use locality::{Locality, SettingsPath, display_path};
pub use package::{ApplicationData, CreateDisposition};

/// Environment variable naming the store root.
pub const STORE_ROOT_ENV: &str = "APPDATA_STORE_ROOT";

/// Where packages are stored.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub root: PathBuf,
}

impl StoreConfig {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Use `root` when given, otherwise the per-user default.
    pub fn from_root(root: Option<PathBuf>) -> Self {
        match root {
            Some(root) => Self { root },
            None => Self {
                root: Self::default_root(),
            },
        }
    }

    /// `<local data dir>/appdata-store`, or a relative directory when the
    /// platform reports none.
    pub fn default_root() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("appdata-store")
    }
}

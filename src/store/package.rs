//! File-system backed application data for one package

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppDataError, Result};

use super::codec::{self, StoredContainer};
use super::{Container, Locality, StoreConfig};

const METADATA_FILE: &str = "package.json";
const SETTINGS_DIR: &str = "Settings";
const DEFAULT_ROAMING_QUOTA_KB: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PackageMetadata {
    #[serde(default)]
    version: u32,
    #[serde(default = "default_quota")]
    roaming_quota_kb: u64,
    #[serde(default)]
    data_changed: Option<DateTime<Utc>>,
}

fn default_quota() -> u64 {
    DEFAULT_ROAMING_QUOTA_KB
}

impl Default for PackageMetadata {
    fn default() -> Self {
        Self {
            version: 0,
            roaming_quota_kb: DEFAULT_ROAMING_QUOTA_KB,
            data_changed: None,
        }
    }
}

/// How `create_container` treats the requested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateDisposition {
    /// Resolve an existing container; fail if any segment is missing.
    Existing,
    /// Create missing containers along the path.
    Always,
}

/// The settings and folders of one package.
#[derive(Debug)]
pub struct ApplicationData {
    package: String,
    dir: PathBuf,
    meta: PackageMetadata,
}

impl ApplicationData {
    /// Open an already provisioned package.
    pub fn open(config: &StoreConfig, package: &str) -> Result<Self> {
        let dir = package_dir(config, package)?;
        let meta_path = dir.join(METADATA_FILE);
        if !meta_path.is_file() {
            return Err(AppDataError::not_found("Package", package));
        }
        let meta = serde_json::from_reader(BufReader::new(File::open(&meta_path)?))?;
        debug!(package, dir = %dir.display(), "opened package");
        Ok(Self {
            package: package.to_string(),
            dir,
            meta,
        })
    }

    /// Create the package layout if needed and open it.
    pub fn provision(config: &StoreConfig, package: &str) -> Result<Self> {
        let dir = package_dir(config, package)?;
        for locality in Locality::ALL {
            fs::create_dir_all(dir.join(locality.folder_name()))?;
        }
        fs::create_dir_all(dir.join(SETTINGS_DIR))?;
        let meta_path = dir.join(METADATA_FILE);
        if !meta_path.exists() {
            write_json(&meta_path, &PackageMetadata::default())?;
            debug!(package, dir = %dir.display(), "provisioned package");
        }
        Self::open(config, package)
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Directory holding a locality's files.
    pub fn folder(&self, locality: Locality) -> PathBuf {
        self.dir.join(locality.folder_name())
    }

    fn settings_file(&self, locality: Locality) -> PathBuf {
        self.dir
            .join(SETTINGS_DIR)
            .join(format!("{}.json", locality.name()))
    }

    /// Load the settings tree of a locality. The root container is named
    /// after the locality; a locality without settings yields an empty root.
    pub fn settings(&self, locality: Locality) -> Result<Container> {
        if !locality.has_settings() {
            return Err(AppDataError::InvalidPath(locality.name().to_string()));
        }
        let path = self.settings_file(locality);
        if !path.is_file() {
            return Ok(Container::new(locality.name()));
        }
        let stored: StoredContainer = serde_json::from_reader(BufReader::new(File::open(&path)?))?;
        let mut root = codec::decode(stored)?;
        root.rename(locality.name());
        Ok(root)
    }

    pub fn save_settings(&self, locality: Locality, root: &Container) -> Result<()> {
        if !locality.has_settings() {
            return Err(AppDataError::InvalidPath(locality.name().to_string()));
        }
        let path = self.settings_file(locality);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_json(&path, &codec::encode(root)?)?;
        debug!(package = %self.package, %locality, "saved settings");
        Ok(())
    }

    /// Resolve (and with `Always`, create) a container below a locality
    /// root, then persist the tree if anything was created.
    pub fn create_container(
        &self,
        locality: Locality,
        segments: &[String],
        disposition: CreateDisposition,
    ) -> Result<Container> {
        let mut root = self.settings(locality)?;
        if let Some(found) = root.find(segments) {
            return Ok(found.clone());
        }
        match disposition {
            CreateDisposition::Existing => Err(AppDataError::not_found(
                "Container path",
                segments.join("\\"),
            )),
            CreateDisposition::Always => {
                let created = root.create_path(segments).clone();
                self.save_settings(locality, &root)?;
                Ok(created)
            }
        }
    }

    /// Remove a container and everything below it.
    pub fn delete_container(&self, locality: Locality, segments: &[String]) -> Result<()> {
        if segments.is_empty() {
            return Err(AppDataError::InvalidPath(locality.name().to_uppercase()));
        }
        let mut root = self.settings(locality)?;
        root.delete_path(segments)?;
        self.save_settings(locality, &root)
    }

    /// Remove a locality's files and, where it has them, its settings.
    pub fn clear(&self, locality: Locality) -> Result<()> {
        let folder = self.folder(locality);
        if folder.is_dir() {
            for entry in fs::read_dir(&folder)? {
                let path = entry?.path();
                if path.is_dir() {
                    fs::remove_dir_all(&path)?;
                } else {
                    fs::remove_file(&path)?;
                }
            }
        }
        if locality.has_settings() {
            let settings = self.settings_file(locality);
            if settings.exists() {
                fs::remove_file(settings)?;
            }
        }
        debug!(package = %self.package, %locality, "cleared");
        Ok(())
    }

    pub fn version(&self) -> u32 {
        self.meta.version
    }

    /// Maximum roaming data size in kilobytes.
    pub fn roaming_storage_quota(&self) -> u64 {
        self.meta.roaming_quota_kb
    }

    pub fn data_changed(&self) -> Option<DateTime<Utc>> {
        self.meta.data_changed
    }

    /// Record that the package's data changed just now.
    pub fn signal_data_changed(&mut self) -> Result<DateTime<Utc>> {
        let now = Utc::now();
        self.meta.data_changed = Some(now);
        self.save_metadata()?;
        Ok(now)
    }

    fn save_metadata(&self) -> Result<()> {
        write_json(&self.dir.join(METADATA_FILE), &self.meta)
    }
}

fn package_dir(config: &StoreConfig, package: &str) -> Result<PathBuf> {
    let valid = !package.is_empty()
        && package != "."
        && package != ".."
        && !package.contains(['/', '\\']);
    if !valid {
        return Err(AppDataError::InvalidPath(package.to_string()));
    }
    Ok(config.root.join(package))
}

/// Write `value` next to `path` and move it into place.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let tmp = path.with_extension(format!("tmp-{}", uuid::Uuid::new_v4().simple()));
    let result = (|| -> Result<()> {
        let mut out = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer_pretty(&mut out, value)?;
        out.flush()?;
        out.get_ref().sync_all()?;
        Ok(())
    })();
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })?;
    Ok(())
}

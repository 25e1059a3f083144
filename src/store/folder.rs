//! Locality folder scanning

use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::warn;

use crate::error::Result;

/// A file or directory below a locality folder.
#[derive(Debug, Clone)]
pub struct FolderEntry {
    /// Path relative to the folder, `/`-separated.
    pub relative: String,
    pub path: PathBuf,
    pub is_dir: bool,
    /// File length in bytes; zero for directories.
    pub len: u64,
}

/// List everything below `root` (not `root` itself) in a stable, parent
/// before child order. Nothing is filtered: hidden and ignored files are
/// application data too.
pub fn scan(root: &Path) -> Result<Vec<FolderEntry>> {
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .ignore(false)
        .parents(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry.map_err(io::Error::other)?;
        if entry.depth() == 0 {
            continue;
        }
        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        // Entry names must survive into archives and reports unchanged.
        let Some(parts) = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()
        else {
            warn!(path = %path.display(), "skipping entry with a non UTF-8 name");
            continue;
        };
        let relative = parts.join("/");
        let metadata = entry.metadata().map_err(io::Error::other)?;
        entries.push(FolderEntry {
            relative,
            path: path.to_path_buf(),
            is_dir: metadata.is_dir(),
            len: if metadata.is_dir() { 0 } else { metadata.len() },
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_lists_nested_entries() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("b/c")).unwrap();
        fs::write(dir.path().join("a.txt"), "12345").unwrap();
        fs::write(dir.path().join("b/c/.hidden"), "x").unwrap();
        fs::write(dir.path().join(".gitignore"), "*.txt\n").unwrap();

        let entries = scan(dir.path()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.relative.as_str()).collect();
        assert_eq!(names, vec![".gitignore", "a.txt", "b", "b/c", "b/c/.hidden"]);

        let a = &entries[1];
        assert!(!a.is_dir);
        assert_eq!(a.len, 5);
        assert!(entries[2].is_dir);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let bad = dir.path().join(OsStr::from_bytes(b"bad\xff"));
        fs::create_dir(&bad).unwrap();
        fs::write(bad.join("inner.txt"), "x").unwrap();
        fs::write(dir.path().join("good.txt"), "y").unwrap();

        let entries = scan(dir.path()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.relative.as_str()).collect();
        assert_eq!(names, vec!["good.txt"]);
    }

    #[test]
    fn test_scan_empty_folder() {
        let dir = TempDir::new().unwrap();
        assert!(scan(dir.path()).unwrap().is_empty());
    }
}

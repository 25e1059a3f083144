//! Storage usage collection and display
//!
//! Counts directories, files and bytes per locality folder and containers
//! and values per settings tree, then prints them as a list or a table.

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use tracing::debug;

use crate::console::Console;
use crate::error::Result;
use crate::selection::{Part, Selection};
use crate::store::{ApplicationData, Container, scan};

/// Allocation unit used to estimate disk space.
const ALLOCATION_UNIT: u64 = 4096;

/// Unit for displayed sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizeUnit {
    #[default]
    Bytes,
    Kilo,
    Mega,
    Giga,
}

/// Layout of the usage report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SizeFormat {
    #[default]
    List,
    Table,
}

/// Settings for one `size` run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeOptions {
    pub selection: Selection,
    pub unit: SizeUnit,
    pub format: SizeFormat,
}

/// Usage of one locality folder. The folder itself is not counted as a
/// directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderUsage {
    pub dirs: u64,
    pub files: u64,
    pub size: u64,
    pub disk: u64,
}

impl FolderUsage {
    pub fn collect(folder: &Path) -> Result<Self> {
        let mut usage = FolderUsage::default();
        for entry in scan(folder)? {
            if entry.is_dir {
                usage.dirs += 1;
            } else {
                usage.files += 1;
                usage.size += entry.len;
                usage.disk += entry.len.div_ceil(ALLOCATION_UNIT) * ALLOCATION_UNIT;
            }
        }
        Ok(usage)
    }
}

/// Usage of one settings tree. The root container is not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsUsage {
    pub containers: u64,
    pub values: u64,
}

impl SettingsUsage {
    pub fn collect(root: &Container) -> Self {
        let (containers, values) = root.count();
        Self { containers, values }
    }
}

/// Format a number with thousand separators.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Format a byte count in `unit`. Scaled units show one truncated decimal
/// and never display less than `0.1`.
pub fn format_bytes(bytes: u64, unit: SizeUnit) -> String {
    let (scale, suffix) = match unit {
        SizeUnit::Bytes => return format_number(bytes),
        SizeUnit::Kilo => (1u64 << 10, "KB"),
        SizeUnit::Mega => (1u64 << 20, "MB"),
        SizeUnit::Giga => (1u64 << 30, "GB"),
    };
    let whole = bytes / scale;
    let mut tenth = (bytes % scale) * 10 / scale;
    if whole == 0 && tenth == 0 {
        tenth = 1;
    }
    format!("{}.{}{}", format_number(whole), tenth, suffix)
}

/// Folder title for a file part, e.g. `LocalCache`.
fn title(part: Part) -> &'static str {
    part.locality().name()
}

/// Print the usage of the selected parts of `app`.
pub fn report<W: Write>(app: &ApplicationData, options: &SizeOptions, console: &mut Console<W>) -> Result<()> {
    if options.format == SizeFormat::Table {
        console.line(
            "Type    Locality   Dirs       Files      File Size  Disk Space\n\
             ------- ---------- ---------- ---------- ---------- ------------",
        )?;
    }

    for part in options.selection.parts() {
        if part.is_settings() {
            let usage = SettingsUsage::collect(&app.settings(part.locality())?);
            debug!(%part, ?usage, "settings usage");
            console.line(&settings_line(title(part), &usage, options.format))?;
            continue;
        }

        let folder = app.folder(part.locality());
        if !folder.is_dir() {
            console.line(&format!("WARNING: {} is missing!", folder.display()))?;
            continue;
        }
        let usage = FolderUsage::collect(&folder)?;
        debug!(%part, ?usage, "folder usage");
        console.line(&folder_line(title(part), &usage, options))?;
    }
    Ok(())
}

fn folder_line(title: &str, usage: &FolderUsage, options: &SizeOptions) -> String {
    let size = format_bytes(usage.size, options.unit);
    let disk = format_bytes(usage.disk, options.unit);
    match options.format {
        SizeFormat::List => format!(
            "{:>10}: Dirs:{} Files:{} Size:{} DiskSpace:{}",
            title,
            format_number(usage.dirs),
            format_number(usage.files),
            size,
            disk
        ),
        SizeFormat::Table => format!(
            "Folder  {:<10} {:>10} {:>10} {:>10} {:>12}",
            title,
            format_number(usage.dirs),
            format_number(usage.files),
            size,
            disk
        ),
    }
}

fn settings_line(title: &str, usage: &SettingsUsage, format: SizeFormat) -> String {
    match format {
        SizeFormat::List => format!(
            "{:>10}: Containers:{} Values:{}",
            title,
            format_number(usage.containers),
            format_number(usage.values)
        ),
        SizeFormat::Table => format!(
            "Setting {:<10} {:>10} {:>10}",
            title,
            format_number(usage.containers),
            format_number(usage.values)
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(1_234_567, SizeUnit::Bytes), "1,234,567");
        assert_eq!(format_bytes(0, SizeUnit::Kilo), "0.1KB");
        assert_eq!(format_bytes(1536, SizeUnit::Kilo), "1.5KB");
        assert_eq!(format_bytes(1023, SizeUnit::Kilo), "0.9KB");
        assert_eq!(format_bytes(3 << 20, SizeUnit::Mega), "3.0MB");
        assert_eq!(format_bytes(10, SizeUnit::Giga), "0.1GB");
    }

    #[test]
    fn test_folder_usage_rounds_disk_space() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/one.bin"), vec![0u8; 10]).unwrap();
        fs::write(dir.path().join("two.bin"), vec![0u8; 4097]).unwrap();
        fs::write(dir.path().join("empty.bin"), b"").unwrap();

        let usage = FolderUsage::collect(dir.path()).unwrap();
        assert_eq!(
            usage,
            FolderUsage {
                dirs: 2,
                files: 3,
                size: 4107,
                disk: 4096 + 8192,
            }
        );
    }

    #[test]
    fn test_lines() {
        let usage = FolderUsage {
            dirs: 1,
            files: 2,
            size: 2048,
            disk: 8192,
        };
        let list = SizeOptions::default();
        assert_eq!(
            folder_line("Local", &usage, &list),
            "     Local: Dirs:1 Files:2 Size:2,048 DiskSpace:8,192"
        );
        let table = SizeOptions {
            format: SizeFormat::Table,
            unit: SizeUnit::Kilo,
            ..Default::default()
        };
        assert_eq!(
            folder_line("Roaming", &usage, &table),
            "Folder  Roaming             1          2      2.0KB        8.0KB"
        );
        assert_eq!(
            settings_line("Local", &SettingsUsage { containers: 3, values: 1200 }, SizeFormat::List),
            "     Local: Containers:3 Values:1,200"
        );
        assert_eq!(
            settings_line("Local", &SettingsUsage { containers: 3, values: 4 }, SizeFormat::Table),
            "Setting Local               3          4"
        );
    }
}

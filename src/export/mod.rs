//! Package export
//!
//! Copies the selected locality folders and serializes the selected
//! settings trees into a directory or a tar archive.
//!
//! # Module Structure
//!
//! - `target` - directory and archive destinations

mod target;

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use tracing::{info, warn};

use crate::console::Console;
use crate::error::Result;
use crate::prompt::{Overwrite, Prompter};
use crate::selection::{Part, Selection};
use crate::store::{ApplicationData, scan};
use crate::walk::{SortOrder, WalkContext};
use crate::writer::SettingsFormat;

pub use target::{ArchiveTarget, Compression, ExportTarget, FilesystemTarget, dir_has_entries};

/// Kind of export destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TargetFormat {
    #[default]
    Archive,
    Filesystem,
}

/// Settings for one export run.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub target_format: TargetFormat,
    pub settings_format: SettingsFormat,
    pub overwrite: Overwrite,
    pub order: SortOrder,
    pub selection: Selection,
    pub compression: Compression,
    pub dir_entries: bool,
}

/// Entry counts of a finished export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub dirs: u64,
    pub files: u64,
    pub settings: u64,
}

/// Name of the settings entry for a settings part, e.g. `LocalSettings.xml`.
pub fn settings_entry(part: Part, format: SettingsFormat) -> String {
    format!("{}.{}", part.name(), format.extension())
}

/// Export `app` to `target`.
pub fn export<W: Write>(
    app: &ApplicationData,
    target: &Path,
    options: &ExportOptions,
    console: &mut Console<W>,
    prompter: &mut dyn Prompter,
) -> Result<ExportSummary> {
    let occupied = match options.target_format {
        TargetFormat::Archive => target.exists(),
        TargetFormat::Filesystem => dir_has_entries(target)?,
    };
    if occupied {
        let question = format!(
            "Export target {} is not empty, overwrite (Yes/No)? ",
            target.display()
        );
        options.overwrite.confirm(prompter, &question)?;
    }

    console.verbose(&format!("Creating {}", target.display()))?;
    let mut sink: Box<dyn ExportTarget> = match options.target_format {
        TargetFormat::Archive => Box::new(ArchiveTarget::create(
            target,
            options.compression,
            options.dir_entries,
        )?),
        TargetFormat::Filesystem => Box::new(FilesystemTarget::create(target)?),
    };

    let mut summary = ExportSummary::default();
    for part in options.selection.parts() {
        console.line(&format!("Scanning {}", part))?;
        if part.is_settings() {
            add_settings(app, part, options, sink.as_mut())?;
            summary.settings += 1;
        } else {
            add_folder(app, part, sink.as_mut(), console, &mut summary)?;
        }
    }
    sink.finish()?;

    info!(
        package = app.package(),
        target = %target.display(),
        dirs = summary.dirs,
        files = summary.files,
        settings = summary.settings,
        "export complete"
    );
    Ok(summary)
}

fn add_settings(
    app: &ApplicationData,
    part: Part,
    options: &ExportOptions,
    sink: &mut dyn ExportTarget,
) -> Result<()> {
    let locality = part.locality();
    let root = app.settings(locality)?;
    let mut buffer = Vec::new();
    {
        let mut writer = options.settings_format.writer(&mut buffer);
        WalkContext::new(locality, options.order, writer.as_mut()).export(&root)?;
    }
    sink.add_bytes(&settings_entry(part, options.settings_format), &buffer)
}

fn add_folder<W: Write>(
    app: &ApplicationData,
    part: Part,
    sink: &mut dyn ExportTarget,
    console: &mut Console<W>,
    summary: &mut ExportSummary,
) -> Result<()> {
    let locality = part.locality();
    let folder = app.folder(locality);
    if !folder.is_dir() {
        warn!(folder = %folder.display(), "locality folder is missing");
        return Ok(());
    }

    let mut count = 0;
    for entry in scan(&folder)? {
        let name = format!("{}/{}", locality.name(), entry.relative);
        if console.is_verbose() {
            console.verbose(&format!("...Adding {}", name))?;
        } else {
            console.print(".")?;
        }
        if entry.is_dir {
            sink.add_dir(&name)?;
            summary.dirs += 1;
        } else {
            sink.add_file(&name, &entry.path)?;
            summary.files += 1;
        }
        count += 1;
    }
    if !console.is_verbose() && count > 0 {
        console.line("")?;
    }
    Ok(())
}

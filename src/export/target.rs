//! Export destinations: a directory tree or a tar archive

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tar::{Builder, EntryType, Header};
use tracing::debug;

use crate::error::{AppDataError, Result};

/// Receives the entries of an export.
///
/// Entry names are relative and `/`-separated, e.g. `Local/logs/today.txt`.
pub trait ExportTarget {
    fn add_dir(&mut self, entry: &str) -> Result<()>;
    fn add_file(&mut self, entry: &str, source: &Path) -> Result<()>;
    fn add_bytes(&mut self, entry: &str, data: &[u8]) -> Result<()>;
    /// Complete the export; entries are only guaranteed durable after this.
    fn finish(self: Box<Self>) -> Result<()>;
}

/// Archive compression, mapped onto zstd levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Compression {
    None,
    Fast,
    #[default]
    Normal,
    Small,
}

impl Compression {
    pub fn zstd_level(self) -> Option<i32> {
        match self {
            Compression::None => None,
            Compression::Fast => Some(1),
            Compression::Normal => Some(3),
            Compression::Small => Some(19),
        }
    }
}

/// True when `path` is a directory with at least one entry.
pub fn dir_has_entries(path: &Path) -> Result<bool> {
    if !path.is_dir() {
        return Ok(false);
    }
    Ok(fs::read_dir(path)?.next().is_some())
}

/// Copies entries below a root directory.
pub struct FilesystemTarget {
    root: PathBuf,
}

impl FilesystemTarget {
    /// Prepare `root`: create it, or empty it when it already has content.
    /// Callers confirm the overwrite first.
    pub fn create(root: &Path) -> Result<Self> {
        if root.is_dir() {
            for entry in fs::read_dir(root)? {
                let path = entry?.path();
                if path.is_dir() {
                    fs::remove_dir_all(&path)?;
                } else {
                    fs::remove_file(&path)?;
                }
            }
        } else {
            fs::create_dir_all(root)?;
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn resolve(&self, entry: &str) -> Result<PathBuf> {
        let path = self.root.join(entry);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(path)
    }
}

impl ExportTarget for FilesystemTarget {
    fn add_dir(&mut self, entry: &str) -> Result<()> {
        fs::create_dir_all(self.root.join(entry))?;
        Ok(())
    }

    fn add_file(&mut self, entry: &str, source: &Path) -> Result<()> {
        fs::copy(source, self.resolve(entry)?)?;
        Ok(())
    }

    fn add_bytes(&mut self, entry: &str, data: &[u8]) -> Result<()> {
        fs::write(self.resolve(entry)?, data)?;
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<()> {
        debug!(root = %self.root.display(), "filesystem export complete");
        Ok(())
    }
}

/// Byte stream under the tar builder.
enum ArchiveSink {
    Plain(BufWriter<File>),
    Zstd(zstd::Encoder<'static, BufWriter<File>>),
}

impl ArchiveSink {
    fn finish(self) -> io::Result<BufWriter<File>> {
        match self {
            ArchiveSink::Plain(out) => Ok(out),
            ArchiveSink::Zstd(encoder) => encoder.finish(),
        }
    }
}

impl Write for ArchiveSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            ArchiveSink::Plain(out) => out.write(buf),
            ArchiveSink::Zstd(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            ArchiveSink::Plain(out) => out.flush(),
            ArchiveSink::Zstd(encoder) => encoder.flush(),
        }
    }
}

/// Writes a tar archive (zstd-compressed unless compression is `None`).
///
/// The archive is built in a sibling temp file and renamed over the
/// destination on `finish`; dropping an unfinished target removes the temp
/// file.
pub struct ArchiveTarget {
    builder: Option<Builder<ArchiveSink>>,
    temp: PathBuf,
    dest: PathBuf,
    dir_entries: bool,
}

impl ArchiveTarget {
    pub fn create(dest: &Path, compression: Compression, dir_entries: bool) -> Result<Self> {
        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp = dest.with_extension(format!("tmp-{}", uuid::Uuid::new_v4().simple()));
        let out = BufWriter::new(File::create(&temp)?);
        let sink = match compression.zstd_level() {
            None => ArchiveSink::Plain(out),
            Some(level) => match zstd::Encoder::new(out, level) {
                Ok(encoder) => ArchiveSink::Zstd(encoder),
                Err(e) => {
                    let _ = fs::remove_file(&temp);
                    return Err(AppDataError::archive(format!("zstd encoder: {}", e)));
                }
            },
        };
        debug!(dest = %dest.display(), ?compression, "creating archive");
        Ok(Self {
            builder: Some(Builder::new(sink)),
            temp,
            dest: dest.to_path_buf(),
            dir_entries,
        })
    }

    fn builder(&mut self) -> Result<&mut Builder<ArchiveSink>> {
        self.builder
            .as_mut()
            .ok_or_else(|| AppDataError::archive("archive already finished"))
    }
}

/// Header without a path; `append_data` writes the name, emitting GNU
/// long-name records for names over 100 bytes.
fn header(kind: EntryType, size: u64, mode: u32) -> Header {
    let mut header = Header::new_gnu();
    header.set_entry_type(kind);
    header.set_size(size);
    header.set_mode(mode);
    header.set_mtime(chrono::Utc::now().timestamp().max(0) as u64);
    header
}

impl ExportTarget for ArchiveTarget {
    fn add_dir(&mut self, entry: &str) -> Result<()> {
        if !self.dir_entries {
            return Ok(());
        }
        let name = format!("{}/", entry.trim_end_matches('/'));
        let mut header = header(EntryType::Directory, 0, 0o755);
        self.builder()?
            .append_data(&mut header, &name, io::empty())
            .map_err(|e| AppDataError::archive(format!("append '{}': {}", name, e)))
    }

    fn add_file(&mut self, entry: &str, source: &Path) -> Result<()> {
        let mut file = File::open(source)?;
        self.builder()?
            .append_file(entry, &mut file)
            .map_err(|e| AppDataError::archive(format!("append '{}': {}", entry, e)))
    }

    fn add_bytes(&mut self, entry: &str, data: &[u8]) -> Result<()> {
        let mut header = header(EntryType::Regular, data.len() as u64, 0o644);
        self.builder()?
            .append_data(&mut header, entry, data)
            .map_err(|e| AppDataError::archive(format!("append '{}': {}", entry, e)))
    }

    fn finish(mut self: Box<Self>) -> Result<()> {
        let builder = self
            .builder
            .take()
            .ok_or_else(|| AppDataError::archive("archive already finished"))?;
        let sink = builder
            .into_inner()
            .map_err(|e| AppDataError::archive(format!("tar finish: {}", e)))?;
        let out = sink
            .finish()
            .map_err(|e| AppDataError::archive(format!("zstd finish: {}", e)))?;
        let file = out.into_inner().map_err(|e| AppDataError::Io(e.into_error()))?;
        file.sync_all()?;
        drop(file);
        fs::rename(&self.temp, &self.dest)?;
        debug!(dest = %self.dest.display(), "archive complete");
        Ok(())
    }
}

impl Drop for ArchiveTarget {
    fn drop(&mut self) {
        if self.temp.exists() {
            self.builder.take();
            let _ = fs::remove_file(&self.temp);
        }
    }
}

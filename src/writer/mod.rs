//! Settings serialization writers
//!
//! This module provides the event interface the export walker drives and two
//! renderings of it:
//! - XML (`<Settings>` document)
//! - JSON (nested objects with `__values__`)
//!
//! # Module Structure
//!
//! - `escape` - XML and JSON text escaping
//! - `xml` - indented XML writer
//! - `json` - indented JSON writer

mod escape;
mod json;
mod xml;

use std::io::{self, Write};

use clap::ValueEnum;

use crate::value::TypedValue;

pub use escape::{json_string, xml_escape};
pub use json::JsonWriter;
pub use xml::XmlWriter;

/// Receives the events of a settings walk.
///
/// `is_last` flags tell a writer whether the item closes its nesting level,
/// so separator-based formats never emit a trailing comma.
pub trait SettingsWriter {
    fn start(&mut self) -> io::Result<()>;
    fn end(&mut self) -> io::Result<()>;

    fn start_containers(&mut self, locality: &str) -> io::Result<()>;
    fn end_containers(&mut self) -> io::Result<()>;

    fn start_container(&mut self, name: &str) -> io::Result<()>;
    fn end_container(&mut self, is_last: bool) -> io::Result<()>;

    fn start_values(&mut self) -> io::Result<()>;
    fn end_values(&mut self, is_last: bool) -> io::Result<()>;

    /// Write one scalar value. Composites arrive through
    /// `start_composite`/`end_composite` instead.
    fn write_value(&mut self, key: &str, value: &TypedValue, is_last: bool) -> io::Result<()>;

    fn start_composite(&mut self, name: &str) -> io::Result<()>;
    fn end_composite(&mut self, is_last: bool) -> io::Result<()>;

    /// Flush buffered output to the destination.
    fn flush(&mut self) -> io::Result<()>;
}

/// Serialization format for exported settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SettingsFormat {
    #[default]
    Xml,
    Json,
}

impl SettingsFormat {
    /// File extension, also used to name export entries.
    pub fn extension(self) -> &'static str {
        match self {
            SettingsFormat::Xml => "xml",
            SettingsFormat::Json => "json",
        }
    }

    /// Build the writer for this format over `out`.
    pub fn writer<'a, W: Write + 'a>(self, out: W) -> Box<dyn SettingsWriter + 'a> {
        match self {
            SettingsFormat::Xml => Box::new(XmlWriter::new(out)),
            SettingsFormat::Json => Box::new(JsonWriter::new(out)),
        }
    }
}

/// Running indentation shared by both writers: three spaces per level.
#[derive(Debug, Default)]
struct Indent {
    level: usize,
    text: String,
}

impl Indent {
    const WIDTH: usize = 3;

    fn push(&mut self) {
        self.level += 1;
        self.text = " ".repeat(self.level * Self::WIDTH);
    }

    fn pop(&mut self) {
        debug_assert!(self.level > 0, "unbalanced writer events");
        self.level = self.level.saturating_sub(1);
        self.text = " ".repeat(self.level * Self::WIDTH);
    }

    fn as_str(&self) -> &str {
        &self.text
    }
}

//! Colored display of query results

use std::io::{self, Write};

use termcolor::{Color, ColorSpec, WriteColor};

use crate::value::{Kind, TypedValue};
use crate::walk::QueryOutput;

/// Prints a query walk as indented, optionally colored lines.
///
/// Container headers are blue and bold, keys white and kind names green.
pub struct QueryPrinter<W: WriteColor> {
    out: W,
}

impl<W: WriteColor> QueryPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn entry(&mut self, indent: &str, key: &str, kind: &str, display: Option<&str>) -> io::Result<()> {
        write!(self.out, "{}", indent)?;
        self.out.set_color(ColorSpec::new().set_fg(Some(Color::White)))?;
        write!(self.out, "{}", key)?;
        self.out.reset()?;
        write!(self.out, "    ")?;
        self.out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(self.out, "{}", kind)?;
        self.out.reset()?;
        match display {
            Some(text) => writeln!(self.out, "    {}", text),
            None => writeln!(self.out),
        }
    }
}

impl<W: WriteColor> QueryOutput for QueryPrinter<W> {
    fn container(&mut self, path: &str) -> io::Result<()> {
        writeln!(self.out)?;
        self.out
            .set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        write!(self.out, "{}", path)?;
        self.out.reset()?;
        writeln!(self.out)
    }

    fn value(&mut self, key: &str, value: &TypedValue) -> io::Result<()> {
        let display = value.to_string();
        self.entry("    ", key, value.kind().name(), Some(&display))
    }

    fn composite(&mut self, key: &str) -> io::Result<()> {
        self.entry("    ", key, Kind::Composite.name(), None)
    }

    fn composite_entry(&mut self, key: &str, value: &TypedValue) -> io::Result<()> {
        let display = value.to_string();
        self.entry("        ", key, value.kind().name(), Some(&display))
    }
}

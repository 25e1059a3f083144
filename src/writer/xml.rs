//! XML settings writer

use std::io::{self, Write};

use crate::value::TypedValue;

use super::escape::xml_escape;
use super::{Indent, SettingsWriter};

/// Renders a settings walk as an indented `<Settings>` document.
pub struct XmlWriter<W: Write> {
    out: W,
    indent: Indent,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            indent: Indent::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}{}", self.indent.as_str(), text)
    }

    fn open(&mut self, tag: &str) -> io::Result<()> {
        self.line(tag)?;
        self.indent.push();
        Ok(())
    }

    fn close(&mut self, tag: &str) -> io::Result<()> {
        self.indent.pop();
        self.line(tag)
    }
}

impl<W: Write> SettingsWriter for XmlWriter<W> {
    fn start(&mut self) -> io::Result<()> {
        self.open("<Settings>")
    }

    fn end(&mut self) -> io::Result<()> {
        self.close("</Settings>")
    }

    fn start_containers(&mut self, locality: &str) -> io::Result<()> {
        self.open(&format!("<Containers locality='{}'>", xml_escape(locality)))
    }

    fn end_containers(&mut self) -> io::Result<()> {
        self.close("</Containers>")
    }

    fn start_container(&mut self, name: &str) -> io::Result<()> {
        self.open(&format!("<Container Name='{}'>", xml_escape(name)))
    }

    fn end_container(&mut self, _is_last: bool) -> io::Result<()> {
        self.close("</Container>")
    }

    fn start_values(&mut self) -> io::Result<()> {
        self.open("<Values>")
    }

    fn end_values(&mut self, _is_last: bool) -> io::Result<()> {
        self.close("</Values>")
    }

    fn write_value(&mut self, key: &str, value: &TypedValue, _is_last: bool) -> io::Result<()> {
        debug_assert!(value.as_composite().is_none(), "composite passed as scalar");
        let text = value.to_string();
        self.line(&format!(
            "<Value Name='{}' Type='{}'>{}</Value>",
            xml_escape(key),
            value.kind().name(),
            xml_escape(&text)
        ))
    }

    fn start_composite(&mut self, name: &str) -> io::Result<()> {
        self.open(&format!("<Composite Name='{}'>", xml_escape(name)))
    }

    fn end_composite(&mut self, _is_last: bool) -> io::Result<()> {
        self.close("</Composite>")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

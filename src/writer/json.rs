//! JSON settings writer

use std::io::{self, Write};

use crate::value::TypedValue;

use super::escape::json_string;
use super::{Indent, SettingsWriter};

/// Key under which a container's own values are nested.
pub const VALUES_KEY: &str = "__values__";

/// Renders a settings walk as nested JSON objects.
///
/// Scalars become `"key": [ "KIND", scalar ]` and composites
/// `"key": [ "Composite", { ... } ]`.
pub struct JsonWriter<W: Write> {
    out: W,
    indent: Indent,
}

impl<W: Write> JsonWriter<W> {
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

    fn open(&mut self, text: &str) -> io::Result<()> {
        self.line(text)?;
        self.indent.push();
        Ok(())
    }

    fn close(&mut self, text: &str, is_last: bool) -> io::Result<()> {
        self.indent.pop();
        self.line(&format!("{}{}", text, delimiter(is_last)))
    }
}

fn delimiter(is_last: bool) -> &'static str {
    if is_last { "" } else { "," }
}

impl<W: Write> SettingsWriter for JsonWriter<W> {
    fn start(&mut self) -> io::Result<()> {
        self.open("{")
    }

    fn end(&mut self) -> io::Result<()> {
        self.close("}", true)
    }

    fn start_containers(&mut self, _locality: &str) -> io::Result<()> {
        Ok(())
    }

    fn end_containers(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn start_container(&mut self, name: &str) -> io::Result<()> {
        self.open(&format!("{}: {{", json_string(name)))
    }

    fn end_container(&mut self, is_last: bool) -> io::Result<()> {
        self.close("}", is_last)
    }

    fn start_values(&mut self) -> io::Result<()> {
        self.open(&format!("\"{}\": {{", VALUES_KEY))
    }

    fn end_values(&mut self, is_last: bool) -> io::Result<()> {
        self.close("}", is_last)
    }

    fn write_value(&mut self, key: &str, value: &TypedValue, is_last: bool) -> io::Result<()> {
        debug_assert!(value.as_composite().is_none(), "composite passed as scalar");
        self.line(&format!(
            "{}: [ {}, {} ]{}",
            json_string(key),
            json_string(value.kind().name()),
            value.to_json_scalar(),
            delimiter(is_last)
        ))
    }

    fn start_composite(&mut self, name: &str) -> io::Result<()> {
        self.open(&format!("{}: [ \"Composite\", {{", json_string(name)))
    }

    fn end_composite(&mut self, is_last: bool) -> io::Result<()> {
        self.close("} ]", is_last)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_value_has_no_trailing_comma() {
        let mut w = JsonWriter::new(Vec::new());
        w.start_values().unwrap();
        w.write_value("k1", &TypedValue::Boolean(true), false).unwrap();
        w.write_value("k2", &TypedValue::Int32(5), true).unwrap();
        w.end_values(true).unwrap();
        let output = String::from_utf8(w.into_inner()).unwrap();

        let expected = "\
\"__values__\": {
   \"k1\": [ \"BOOLEAN\", true ],
   \"k2\": [ \"INT32\", 5 ]
}
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_document_is_valid_json() {
        let mut w = JsonWriter::new(Vec::new());
        w.start().unwrap();
        w.start_containers("Local").unwrap();
        w.start_container("Local").unwrap();
        w.start_values().unwrap();
        w.write_value("path", &TypedValue::from("C:\\Users\n"), false).unwrap();
        w.start_composite("pos").unwrap();
        w.write_value("x", &TypedValue::Double(1.5), false).unwrap();
        w.write_value("nothing", &TypedValue::Empty, true).unwrap();
        w.end_composite(true).unwrap();
        w.end_values(false).unwrap();
        w.start_container("child \"quoted\"").unwrap();
        w.start_values().unwrap();
        w.write_value("n", &TypedValue::UInt8(1), true).unwrap();
        w.end_values(true).unwrap();
        w.end_container(true).unwrap();
        w.end_container(true).unwrap();
        w.end_containers().unwrap();
        w.end().unwrap();

        let output = String::from_utf8(w.into_inner()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&output).unwrap();
        let root = &doc["Local"];
        assert_eq!(root["__values__"]["path"][1], "C:\\Users\n");
        assert_eq!(root["__values__"]["pos"][0], "Composite");
        assert_eq!(root["__values__"]["pos"][1]["x"][1], 1.5);
        assert!(root["__values__"]["pos"][1]["nothing"][1].is_null());
        assert_eq!(root["child \"quoted\""]["__values__"]["n"][0], "UINT8");
    }

    #[test]
    fn test_control_characters_in_keys_and_strings() {
        let mut w = JsonWriter::new(Vec::new());
        w.start().unwrap();
        w.start_values().unwrap();
        w.write_value("tab\tbell\u{7}", &TypedValue::from("form\u{c}feed"), true).unwrap();
        w.end_values(true).unwrap();
        w.end().unwrap();

        let output = String::from_utf8(w.into_inner()).unwrap();
        assert!(output.contains(r#""tab\tbell\u0007": [ "STRING", "form\ffeed" ]"#));
        let doc: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(doc["__values__"]["tab\tbell\u{7}"][1], "form\u{c}feed");
    }
}

//! Text escaping for the XML and JSON writers

use std::borrow::Cow;
use std::fmt::Write as _;

/// Control characters XML 1.0 cannot carry, not even as references.
fn is_forbidden_control(c: char) -> bool {
    c < ' ' && !matches!(c, '\t' | '\n' | '\r')
}

fn xml_escape_needed(s: &str) -> bool {
    s.chars().any(|c| {
        matches!(c, '&' | '<' | '>' | '"' | '\'') || u32::from(c) > 0x7F || is_forbidden_control(c)
    })
}

/// Escape markup characters and encode everything above U+007F as a numeric
/// character reference. Control characters other than tab, newline and
/// carriage return become U+FFFD.
pub fn xml_escape(s: &str) -> Cow<'_, str> {
    if !xml_escape_needed(s) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() * 2);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if is_forbidden_control(c) => out.push_str("&#xFFFD;"),
            c if u32::from(c) > 0x7F => {
                let _ = write!(out, "&#x{:04X};", u32::from(c));
            }
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Quote and escape a string as a JSON string literal.
pub fn json_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_escape_markup() {
        assert_eq!(
            xml_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&apos;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_xml_escape_non_ascii() {
        assert_eq!(xml_escape("café"), "caf&#x00E9;");
        assert_eq!(xml_escape("\u{1F600}"), "&#x1F600;");
    }

    #[test]
    fn test_xml_escape_borrows_plain_text() {
        assert!(matches!(xml_escape("plain"), Cow::Borrowed("plain")));
        assert_eq!(xml_escape(""), "");
    }

    #[test]
    fn test_xml_escape_replaces_control_characters() {
        assert_eq!(xml_escape("a\u{1}b"), "a&#xFFFD;b");
        assert_eq!(xml_escape("tab\tnl\ncr\r"), "tab\tnl\ncr\r");
    }

    #[test]
    fn test_json_string() {
        assert_eq!(json_string(r#"a"b"#), r#""a\"b""#);
        assert_eq!(json_string(r"C:\temp"), r#""C:\\temp""#);
        assert_eq!(json_string("line\nnext\ttab"), r#""line\nnext\ttab""#);
        assert_eq!(json_string("\u{01}"), r#""\u0001""#);
        assert_eq!(json_string("café"), "\"café\"");
    }

    #[test]
    fn test_json_string_parses_back() {
        let raw = "quote\" back\\ nl\n ctl\u{1f} é";
        let parsed: String = serde_json::from_str(&json_string(raw)).unwrap();
        assert_eq!(parsed, raw);
    }
}

//! Typed values stored in settings containers
//!
//! A [`TypedValue`] carries exactly one [`Kind`]. Scalars, homogeneous arrays
//! and flat composites are supported; composites never nest.
//!
//! # Module Structure
//!
//! - `kind` - kind tags and their canonical names
//! - `scalar` - structured scalars (point, size, rect, time span)
//! - `parse` - literal parsing for the settable kinds
//! - `composite` - ordered key/value maps used by containers and composites

mod composite;
mod kind;
mod parse;
mod scalar;

use std::fmt;

use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

pub use composite::PropertySet;
pub use kind::Kind;
pub use parse::parse;
pub use scalar::{Point, Rect, Size, TimeSpan, char16_to_char};

/// A flat composite: named scalar values grouped under one key.
pub type Composite = PropertySet<TypedValue>;

/// A value held by a settings container.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Empty,
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Single(f32),
    Double(f64),
    Char16(u16),
    Boolean(bool),
    String(String),
    DateTime(DateTime<FixedOffset>),
    TimeSpan(TimeSpan),
    Guid(Uuid),
    Point(Point),
    Size(Size),
    Rect(Rect),
    Composite(Composite),
    UInt8Array(Vec<u8>),
    Int16Array(Vec<i16>),
    UInt16Array(Vec<u16>),
    Int32Array(Vec<i32>),
    UInt32Array(Vec<u32>),
    Int64Array(Vec<i64>),
    UInt64Array(Vec<u64>),
    SingleArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    Char16Array(Vec<u16>),
    BooleanArray(Vec<bool>),
    StringArray(Vec<String>),
    DateTimeArray(Vec<DateTime<FixedOffset>>),
    TimeSpanArray(Vec<TimeSpan>),
    GuidArray(Vec<Uuid>),
    PointArray(Vec<Point>),
    SizeArray(Vec<Size>),
    RectArray(Vec<Rect>),
}

impl TypedValue {
    /// The kind tag of this value.
    pub fn kind(&self) -> Kind {
        match self {
            TypedValue::Empty => Kind::Empty,
            TypedValue::UInt8(_) => Kind::UInt8,
            TypedValue::Int16(_) => Kind::Int16,
            TypedValue::UInt16(_) => Kind::UInt16,
            TypedValue::Int32(_) => Kind::Int32,
            TypedValue::UInt32(_) => Kind::UInt32,
            TypedValue::Int64(_) => Kind::Int64,
            TypedValue::UInt64(_) => Kind::UInt64,
            TypedValue::Single(_) => Kind::Single,
            TypedValue::Double(_) => Kind::Double,
            TypedValue::Char16(_) => Kind::Char16,
            TypedValue::Boolean(_) => Kind::Boolean,
            TypedValue::String(_) => Kind::String,
            TypedValue::DateTime(_) => Kind::DateTime,
            TypedValue::TimeSpan(_) => Kind::TimeSpan,
            TypedValue::Guid(_) => Kind::Guid,
            TypedValue::Point(_) => Kind::Point,
            TypedValue::Size(_) => Kind::Size,
            TypedValue::Rect(_) => Kind::Rect,
            TypedValue::Composite(_) => Kind::Composite,
            TypedValue::UInt8Array(_) => Kind::UInt8Array,
            TypedValue::Int16Array(_) => Kind::Int16Array,
            TypedValue::UInt16Array(_) => Kind::UInt16Array,
            TypedValue::Int32Array(_) => Kind::Int32Array,
            TypedValue::UInt32Array(_) => Kind::UInt32Array,
            TypedValue::Int64Array(_) => Kind::Int64Array,
            TypedValue::UInt64Array(_) => Kind::UInt64Array,
            TypedValue::SingleArray(_) => Kind::SingleArray,
            TypedValue::DoubleArray(_) => Kind::DoubleArray,
            TypedValue::Char16Array(_) => Kind::Char16Array,
            TypedValue::BooleanArray(_) => Kind::BooleanArray,
            TypedValue::StringArray(_) => Kind::StringArray,
            TypedValue::DateTimeArray(_) => Kind::DateTimeArray,
            TypedValue::TimeSpanArray(_) => Kind::TimeSpanArray,
            TypedValue::GuidArray(_) => Kind::GuidArray,
            TypedValue::PointArray(_) => Kind::PointArray,
            TypedValue::SizeArray(_) => Kind::SizeArray,
            TypedValue::RectArray(_) => Kind::RectArray,
        }
    }

    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            TypedValue::Composite(c) => Some(c),
            _ => None,
        }
    }

    /// Render the value for a JSON document.
    ///
    /// Booleans and finite numbers are bare, `Empty` is `null`, and every
    /// other kind is the quoted, escaped display text. Non-finite floats
    /// are quoted so the document stays valid JSON.
    pub fn to_json_scalar(&self) -> String {
        match self {
            TypedValue::Empty => "null".to_string(),
            TypedValue::Boolean(b) => b.to_string(),
            TypedValue::Single(v) if !v.is_finite() => quote_json(&self.to_string()),
            TypedValue::Double(v) if !v.is_finite() => quote_json(&self.to_string()),
            v if v.kind().is_numeric() => v.to_string(),
            v => quote_json(&v.to_string()),
        }
    }
}

fn quote_json(s: &str) -> String {
    crate::writer::json_string(s)
}

fn write_list<T, F>(f: &mut fmt::Formatter<'_>, items: &[T], mut item: F) -> fmt::Result
where
    F: FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
{
    f.write_str("[")?;
    for (i, v) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item(f, v)?;
    }
    f.write_str("]")
}

fn write_items<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    write_list(f, items, |f, v| write!(f, "{}", v))
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Empty => Ok(()),
            TypedValue::UInt8(v) => write!(f, "{}", v),
            TypedValue::Int16(v) => write!(f, "{}", v),
            TypedValue::UInt16(v) => write!(f, "{}", v),
            TypedValue::Int32(v) => write!(f, "{}", v),
            TypedValue::UInt32(v) => write!(f, "{}", v),
            TypedValue::Int64(v) => write!(f, "{}", v),
            TypedValue::UInt64(v) => write!(f, "{}", v),
            TypedValue::Single(v) => write!(f, "{}", v),
            TypedValue::Double(v) => write!(f, "{}", v),
            TypedValue::Char16(v) => write!(f, "{}", char16_to_char(*v)),
            TypedValue::Boolean(v) => write!(f, "{}", v),
            TypedValue::String(v) => f.write_str(v),
            TypedValue::DateTime(v) => f.write_str(&v.to_rfc3339()),
            TypedValue::TimeSpan(v) => write!(f, "{}", v),
            TypedValue::Guid(v) => write!(f, "{}", v.hyphenated()),
            TypedValue::Point(v) => write!(f, "{}", v),
            TypedValue::Size(v) => write!(f, "{}", v),
            TypedValue::Rect(v) => write!(f, "{}", v),
            TypedValue::Composite(c) => write!(f, "Composite({} values)", c.len()),
            TypedValue::UInt8Array(v) => write_items(f, v),
            TypedValue::Int16Array(v) => write_items(f, v),
            TypedValue::UInt16Array(v) => write_items(f, v),
            TypedValue::Int32Array(v) => write_items(f, v),
            TypedValue::UInt32Array(v) => write_items(f, v),
            TypedValue::Int64Array(v) => write_items(f, v),
            TypedValue::UInt64Array(v) => write_items(f, v),
            TypedValue::SingleArray(v) => write_items(f, v),
            TypedValue::DoubleArray(v) => write_items(f, v),
            TypedValue::Char16Array(v) => {
                write_list(f, v, |f, c| write!(f, "{}", char16_to_char(*c)))
            }
            TypedValue::BooleanArray(v) => write_items(f, v),
            TypedValue::StringArray(v) => write_items(f, v),
            TypedValue::DateTimeArray(v) => write_list(f, v, |f, d| f.write_str(&d.to_rfc3339())),
            TypedValue::TimeSpanArray(v) => write_items(f, v),
            TypedValue::GuidArray(v) => write_list(f, v, |f, g| write!(f, "{}", g.hyphenated())),
            TypedValue::PointArray(v) => write_items(f, v),
            TypedValue::SizeArray(v) => write_items(f, v),
            TypedValue::RectArray(v) => write_items(f, v),
        }
    }
}

impl From<bool> for TypedValue {
    fn from(v: bool) -> Self {
        TypedValue::Boolean(v)
    }
}

impl From<i32> for TypedValue {
    fn from(v: i32) -> Self {
        TypedValue::Int32(v)
    }
}

impl From<i64> for TypedValue {
    fn from(v: i64) -> Self {
        TypedValue::Int64(v)
    }
}

impl From<f64> for TypedValue {
    fn from(v: f64) -> Self {
        TypedValue::Double(v)
    }
}

impl From<&str> for TypedValue {
    fn from(v: &str) -> Self {
        TypedValue::String(v.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(v: String) -> Self {
        TypedValue::String(v)
    }
}

impl From<Composite> for TypedValue {
    fn from(v: Composite) -> Self {
        TypedValue::Composite(v)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_json_scalar_split() {
        assert_eq!(TypedValue::Boolean(true).to_json_scalar(), "true");
        assert_eq!(TypedValue::Boolean(false).to_json_scalar(), "false");
        assert_eq!(TypedValue::Int32(5).to_json_scalar(), "5");
        assert_eq!(TypedValue::UInt64(u64::MAX).to_json_scalar(), "18446744073709551615");
        assert_eq!(TypedValue::Double(2.5).to_json_scalar(), "2.5");
        assert_eq!(TypedValue::Empty.to_json_scalar(), "null");
        assert_eq!(TypedValue::from("say \"hi\"").to_json_scalar(), r#""say \"hi\"""#);
        assert_eq!(TypedValue::Char16(u16::from(b'x')).to_json_scalar(), "\"x\"");
    }

    #[test]
    fn test_json_scalar_non_finite_is_quoted() {
        assert_eq!(TypedValue::Double(f64::NAN).to_json_scalar(), "\"NaN\"");
        assert_eq!(TypedValue::Single(f32::INFINITY).to_json_scalar(), "\"inf\"");
    }

    #[test]
    fn test_json_scalar_structured_kinds_are_quoted() {
        let guid = Uuid::nil();
        assert_eq!(
            TypedValue::Guid(guid).to_json_scalar(),
            "\"00000000-0000-0000-0000-000000000000\""
        );
        assert_eq!(TypedValue::Int32Array(vec![1, 2, 3]).to_json_scalar(), "\"[1, 2, 3]\"");
        let when = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .unwrap();
        assert_eq!(
            TypedValue::DateTime(when).to_json_scalar(),
            "\"2024-01-02T03:04:05+00:00\""
        );
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(TypedValue::Empty.kind(), Kind::Empty);
        assert_eq!(TypedValue::StringArray(vec![]).kind(), Kind::StringArray);
        assert_eq!(TypedValue::Composite(Composite::new()).kind(), Kind::Composite);
        assert_eq!(TypedValue::TimeSpan(TimeSpan(1)).kind(), Kind::TimeSpan);
    }

    #[test]
    fn test_display_arrays_and_chars() {
        assert_eq!(
            TypedValue::Char16Array(vec![u16::from(b'a'), u16::from(b'b')]).to_string(),
            "[a, b]"
        );
        assert_eq!(TypedValue::BooleanArray(vec![true]).to_string(), "[true]");
        assert_eq!(TypedValue::Empty.to_string(), "");
    }
}

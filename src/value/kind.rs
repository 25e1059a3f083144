//! Kind tags for typed values and their canonical names

use std::fmt;
use std::str::FromStr;

use crate::error::{AppDataError, Result};

/// Discriminant of a [`TypedValue`](super::TypedValue).
///
/// `Unknown` is never carried by a value; it stands for "no kind", e.g. when
/// no type filter is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Unknown,
    Empty,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Char16,
    Boolean,
    String,
    DateTime,
    TimeSpan,
    Guid,
    Point,
    Size,
    Rect,
    Composite,
    UInt8Array,
    Int16Array,
    UInt16Array,
    Int32Array,
    UInt32Array,
    Int64Array,
    UInt64Array,
    SingleArray,
    DoubleArray,
    Char16Array,
    BooleanArray,
    StringArray,
    DateTimeArray,
    TimeSpanArray,
    GuidArray,
    PointArray,
    SizeArray,
    RectArray,
}

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Kind; 39] = [
        Kind::Unknown,
        Kind::Empty,
        Kind::UInt8,
        Kind::Int16,
        Kind::UInt16,
        Kind::Int32,
        Kind::UInt32,
        Kind::Int64,
        Kind::UInt64,
        Kind::Single,
        Kind::Double,
        Kind::Char16,
        Kind::Boolean,
        Kind::String,
        Kind::DateTime,
        Kind::TimeSpan,
        Kind::Guid,
        Kind::Point,
        Kind::Size,
        Kind::Rect,
        Kind::Composite,
        Kind::UInt8Array,
        Kind::Int16Array,
        Kind::UInt16Array,
        Kind::Int32Array,
        Kind::UInt32Array,
        Kind::Int64Array,
        Kind::UInt64Array,
        Kind::SingleArray,
        Kind::DoubleArray,
        Kind::Char16Array,
        Kind::BooleanArray,
        Kind::StringArray,
        Kind::DateTimeArray,
        Kind::TimeSpanArray,
        Kind::GuidArray,
        Kind::PointArray,
        Kind::SizeArray,
        Kind::RectArray,
    ];

    /// Kinds that can be built from a command-line literal.
    pub const SETTABLE: [Kind; 13] = [
        Kind::Empty,
        Kind::Boolean,
        Kind::Char16,
        Kind::String,
        Kind::UInt8,
        Kind::Int16,
        Kind::UInt16,
        Kind::Int32,
        Kind::UInt32,
        Kind::Int64,
        Kind::UInt64,
        Kind::Single,
        Kind::Double,
    ];

    /// Canonical upper-case name; array kinds end in `[]`.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Unknown => "UNKNOWN",
            Kind::Empty => "EMPTY",
            Kind::UInt8 => "UINT8",
            Kind::Int16 => "INT16",
            Kind::UInt16 => "UINT16",
            Kind::Int32 => "INT32",
            Kind::UInt32 => "UINT32",
            Kind::Int64 => "INT64",
            Kind::UInt64 => "UINT64",
            Kind::Single => "SINGLE",
            Kind::Double => "DOUBLE",
            Kind::Char16 => "CHAR16",
            Kind::Boolean => "BOOLEAN",
            Kind::String => "STRING",
            Kind::DateTime => "DATETIME",
            Kind::TimeSpan => "TIMESPAN",
            Kind::Guid => "GUID",
            Kind::Point => "POINT",
            Kind::Size => "SIZE",
            Kind::Rect => "RECT",
            Kind::Composite => "COMPOSITE",
            Kind::UInt8Array => "UINT8[]",
            Kind::Int16Array => "INT16[]",
            Kind::UInt16Array => "UINT16[]",
            Kind::Int32Array => "INT32[]",
            Kind::UInt32Array => "UINT32[]",
            Kind::Int64Array => "INT64[]",
            Kind::UInt64Array => "UINT64[]",
            Kind::SingleArray => "SINGLE[]",
            Kind::DoubleArray => "DOUBLE[]",
            Kind::Char16Array => "CHAR16[]",
            Kind::BooleanArray => "BOOLEAN[]",
            Kind::StringArray => "STRING[]",
            Kind::DateTimeArray => "DATETIME[]",
            Kind::TimeSpanArray => "TIMESPAN[]",
            Kind::GuidArray => "GUID[]",
            Kind::PointArray => "POINT[]",
            Kind::SizeArray => "SIZE[]",
            Kind::RectArray => "RECT[]",
        }
    }

    /// Look a kind up by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Result<Kind> {
        Kind::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| AppDataError::UnsupportedType(name.to_string()))
    }

    /// Look a kind up by name and require it to be settable from a literal.
    pub fn settable_from_name(name: &str) -> Result<Kind> {
        let kind = Kind::from_name(name)?;
        if kind.is_settable() {
            Ok(kind)
        } else {
            Err(AppDataError::UnsupportedType(name.to_string()))
        }
    }

    /// Look a kind up for a type filter. No value carries `UNKNOWN`, so it
    /// is rejected rather than matching nothing.
    pub fn filter_from_name(name: &str) -> Result<Kind> {
        match Kind::from_name(name)? {
            Kind::Unknown => Err(AppDataError::UnsupportedType(name.to_string())),
            kind => Ok(kind),
        }
    }

    pub fn is_settable(self) -> bool {
        Kind::SETTABLE.contains(&self)
    }

    pub fn is_array(self) -> bool {
        self.element().is_some()
    }

    /// Numeric kinds render as bare JSON numbers.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Kind::UInt8
                | Kind::Int16
                | Kind::UInt16
                | Kind::Int32
                | Kind::UInt32
                | Kind::Int64
                | Kind::UInt64
                | Kind::Single
                | Kind::Double
        )
    }

    /// Element kind of an array kind.
    pub fn element(self) -> Option<Kind> {
        let element = match self {
            Kind::UInt8Array => Kind::UInt8,
            Kind::Int16Array => Kind::Int16,
            Kind::UInt16Array => Kind::UInt16,
            Kind::Int32Array => Kind::Int32,
            Kind::UInt32Array => Kind::UInt32,
            Kind::Int64Array => Kind::Int64,
            Kind::UInt64Array => Kind::UInt64,
            Kind::SingleArray => Kind::Single,
            Kind::DoubleArray => Kind::Double,
            Kind::Char16Array => Kind::Char16,
            Kind::BooleanArray => Kind::Boolean,
            Kind::StringArray => Kind::String,
            Kind::DateTimeArray => Kind::DateTime,
            Kind::TimeSpanArray => Kind::TimeSpan,
            Kind::GuidArray => Kind::Guid,
            Kind::PointArray => Kind::Point,
            Kind::SizeArray => Kind::Size,
            Kind::RectArray => Kind::Rect,
            _ => return None,
        };
        Some(element)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = AppDataError;

    fn from_str(s: &str) -> Result<Self> {
        Kind::from_name(s)
    }
}

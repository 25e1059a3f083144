//! Literal parsing for the settable kinds

use std::str::FromStr;

use crate::error::{AppDataError, Result};

use super::{Kind, TypedValue};

/// Convert a command-line literal into a value of `kind`.
///
/// Empty text yields the zero value for numeric and boolean kinds. `Char16`
/// needs exactly one UTF-16 code unit and `String` is taken verbatim.
/// Kinds outside [`Kind::SETTABLE`] are rejected as unsupported.
pub fn parse(kind: Kind, text: &str) -> Result<TypedValue> {
    let value = match kind {
        Kind::Empty => TypedValue::Empty,
        Kind::String => TypedValue::String(text.to_string()),
        Kind::Char16 => {
            let mut units = text.encode_utf16();
            match (units.next(), units.next()) {
                (Some(unit), None) => TypedValue::Char16(unit),
                _ => return Err(AppDataError::format(kind.name(), text)),
            }
        }
        Kind::Boolean => TypedValue::Boolean(parse_bool(text)?),
        Kind::UInt8 => TypedValue::UInt8(parse_number(kind, text)?),
        Kind::Int16 => TypedValue::Int16(parse_number(kind, text)?),
        Kind::UInt16 => TypedValue::UInt16(parse_number(kind, text)?),
        Kind::Int32 => TypedValue::Int32(parse_number(kind, text)?),
        Kind::UInt32 => TypedValue::UInt32(parse_number(kind, text)?),
        Kind::Int64 => TypedValue::Int64(parse_number(kind, text)?),
        Kind::UInt64 => TypedValue::UInt64(parse_number(kind, text)?),
        Kind::Single => TypedValue::Single(parse_number(kind, text)?),
        Kind::Double => TypedValue::Double(parse_number(kind, text)?),
        other => return Err(AppDataError::UnsupportedType(other.name().to_string())),
    };
    Ok(value)
}

fn parse_bool(text: &str) -> Result<bool> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Ok(false)
    } else if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(AppDataError::format(Kind::Boolean.name(), text))
    }
}

fn parse_number<T>(kind: Kind, text: &str) -> Result<T>
where
    T: FromStr + Default,
{
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    trimmed
        .parse()
        .map_err(|_| AppDataError::format(kind.name(), text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_zero_values() {
        assert_eq!(parse(Kind::Boolean, "").unwrap(), TypedValue::Boolean(false));
        assert_eq!(parse(Kind::UInt8, "").unwrap(), TypedValue::UInt8(0));
        assert_eq!(parse(Kind::Int64, "").unwrap(), TypedValue::Int64(0));
        assert_eq!(parse(Kind::Double, "").unwrap(), TypedValue::Double(0.0));
        assert_eq!(parse(Kind::String, "").unwrap(), TypedValue::String(String::new()));
    }

    #[test]
    fn test_parsed_values_classify_to_requested_kind() {
        let literals = [
            (Kind::Empty, "ignored"),
            (Kind::Boolean, "TRUE"),
            (Kind::Char16, "z"),
            (Kind::String, "hello"),
            (Kind::UInt8, "255"),
            (Kind::Int16, "-32768"),
            (Kind::UInt16, "65535"),
            (Kind::Int32, " 42 "),
            (Kind::UInt32, "+7"),
            (Kind::Int64, "-9000000000"),
            (Kind::UInt64, "18446744073709551615"),
            (Kind::Single, "1.25"),
            (Kind::Double, "-3e10"),
        ];
        for (kind, text) in literals {
            assert_eq!(parse(kind, text).unwrap().kind(), kind, "literal {:?}", text);
        }
    }

    #[test]
    fn test_char16_requires_exactly_one_unit() {
        assert!(matches!(parse(Kind::Char16, ""), Err(AppDataError::Format { .. })));
        assert!(matches!(parse(Kind::Char16, "ab"), Err(AppDataError::Format { .. })));
        // U+1F600 needs a surrogate pair
        assert!(parse(Kind::Char16, "\u{1F600}").is_err());
        assert_eq!(parse(Kind::Char16, "é").unwrap(), TypedValue::Char16(0xE9));
    }

    #[test]
    fn test_malformed_literals_are_format_errors() {
        for (kind, text) in [
            (Kind::UInt8, "256"),
            (Kind::UInt16, "-1"),
            (Kind::Int32, "12abc"),
            (Kind::Boolean, "yes"),
            (Kind::Double, "1.2.3"),
        ] {
            let err = parse(kind, text).unwrap_err();
            assert!(
                matches!(err, AppDataError::Format { .. }),
                "{:?} {:?} gave {:?}",
                kind,
                text,
                err
            );
        }
    }

    #[test]
    fn test_structured_kinds_are_not_settable() {
        assert!(matches!(
            parse(Kind::Guid, "00000000-0000-0000-0000-000000000000"),
            Err(AppDataError::UnsupportedType(_))
        ));
        assert!(matches!(parse(Kind::Composite, ""), Err(AppDataError::UnsupportedType(_))));
    }

    #[test]
    fn test_string_passes_through_unchanged() {
        assert_eq!(
            parse(Kind::String, "  spaced  ").unwrap(),
            TypedValue::String("  spaced  ".to_string())
        );
    }
}

//! On-disk representation of settings trees
//!
//! Containers persist as `{name, values: [{key, type, data}], containers}`.
//! `type` is the kind name, `data` a JSON rendering of the payload that
//! keeps the exact kind (floats stay floats, UTF-16 units stay units).

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value, json};
use uuid::Uuid;

use crate::error::{AppDataError, Result};
use crate::value::{Composite, Kind, TimeSpan, TypedValue};

use super::Container;

#[derive(Debug, Serialize, Deserialize)]
pub struct StoredContainer {
    pub name: String,
    #[serde(default)]
    pub values: Vec<StoredValue>,
    #[serde(default)]
    pub containers: Vec<StoredContainer>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoredValue {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

pub fn encode(container: &Container) -> Result<StoredContainer> {
    Ok(StoredContainer {
        name: container.name().to_string(),
        values: encode_values(container.values().iter(), true)?,
        containers: container
            .containers()
            .values()
            .map(encode)
            .collect::<Result<_>>()?,
    })
}

pub fn decode(stored: StoredContainer) -> Result<Container> {
    let mut container = Container::new(stored.name);
    for value in stored.values {
        let decoded = decode_value(&value, true)?;
        container.values_mut().insert(value.key, decoded);
    }
    for child in stored.containers {
        container.add_child(decode(child)?);
    }
    Ok(container)
}

fn encode_values<'a>(
    values: impl Iterator<Item = (&'a str, &'a TypedValue)>,
    allow_composite: bool,
) -> Result<Vec<StoredValue>> {
    values
        .map(|(key, value)| {
            let data = match value {
                TypedValue::Composite(_) if !allow_composite => {
                    return Err(AppDataError::UnsupportedType(Kind::Composite.name().into()));
                }
                TypedValue::Composite(c) => {
                    serde_json::to_value(encode_values(c.iter(), false)?)?
                }
                v => encode_data(v)?,
            };
            Ok(StoredValue {
                key: key.to_string(),
                kind: value.kind().name().to_string(),
                data,
            })
        })
        .collect()
}

fn float(v: f64) -> Value {
    Number::from_f64(v)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(v.to_string()))
}

fn encode_data(value: &TypedValue) -> Result<Value> {
    let data = match value {
        TypedValue::Empty => Value::Null,
        TypedValue::UInt8(v) => json!(v),
        TypedValue::Int16(v) => json!(v),
        TypedValue::UInt16(v) => json!(v),
        TypedValue::Int32(v) => json!(v),
        TypedValue::UInt32(v) => json!(v),
        TypedValue::Int64(v) => json!(v),
        TypedValue::UInt64(v) => json!(v),
        TypedValue::Single(v) => float(f64::from(*v)),
        TypedValue::Double(v) => float(*v),
        TypedValue::Char16(v) => json!(v),
        TypedValue::Boolean(v) => json!(v),
        TypedValue::String(v) => json!(v),
        TypedValue::DateTime(v) => json!(v.to_rfc3339()),
        TypedValue::TimeSpan(v) => json!(v.ticks()),
        TypedValue::Guid(v) => json!(v.hyphenated().to_string()),
        TypedValue::Point(v) => serde_json::to_value(v)?,
        TypedValue::Size(v) => serde_json::to_value(v)?,
        TypedValue::Rect(v) => serde_json::to_value(v)?,
        TypedValue::Composite(_) => {
            return Err(AppDataError::UnsupportedType(Kind::Composite.name().into()));
        }
        TypedValue::UInt8Array(v) => json!(v),
        TypedValue::Int16Array(v) => json!(v),
        TypedValue::UInt16Array(v) => json!(v),
        TypedValue::Int32Array(v) => json!(v),
        TypedValue::UInt32Array(v) => json!(v),
        TypedValue::Int64Array(v) => json!(v),
        TypedValue::UInt64Array(v) => json!(v),
        TypedValue::SingleArray(v) => v.iter().map(|x| float(f64::from(*x))).collect(),
        TypedValue::DoubleArray(v) => v.iter().map(|x| float(*x)).collect(),
        TypedValue::Char16Array(v) => json!(v),
        TypedValue::BooleanArray(v) => json!(v),
        TypedValue::StringArray(v) => json!(v),
        TypedValue::DateTimeArray(v) => v.iter().map(|d| json!(d.to_rfc3339())).collect(),
        TypedValue::TimeSpanArray(v) => v.iter().map(|t| json!(t.ticks())).collect(),
        TypedValue::GuidArray(v) => v.iter().map(|g| json!(g.hyphenated().to_string())).collect(),
        TypedValue::PointArray(v) => serde_json::to_value(v)?,
        TypedValue::SizeArray(v) => serde_json::to_value(v)?,
        TypedValue::RectArray(v) => serde_json::to_value(v)?,
    };
    Ok(data)
}

fn decode_value(stored: &StoredValue, allow_composite: bool) -> Result<TypedValue> {
    let kind = Kind::from_name(&stored.kind)?;
    match kind {
        Kind::Unknown => Err(AppDataError::UnsupportedType(stored.kind.clone())),
        Kind::Composite if !allow_composite => {
            Err(AppDataError::UnsupportedType(stored.kind.clone()))
        }
        Kind::Composite => {
            let entries: Vec<StoredValue> = serde_json::from_value(stored.data.clone())
                .map_err(|_| AppDataError::format(kind.name(), stored.data.to_string()))?;
            let mut composite = Composite::new();
            for entry in &entries {
                composite.insert(entry.key.clone(), decode_value(entry, false)?);
            }
            Ok(TypedValue::Composite(composite))
        }
        k if k.is_array() => decode_array(k, &stored.data),
        k => decode_scalar(k, &stored.data),
    }
}

fn unsigned<T: TryFrom<u64>>(data: &Value) -> Option<T> {
    data.as_u64().and_then(|n| T::try_from(n).ok())
}

fn signed<T: TryFrom<i64>>(data: &Value) -> Option<T> {
    data.as_i64().and_then(|n| T::try_from(n).ok())
}

fn as_float(data: &Value) -> Option<f64> {
    match data {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn decode_scalar(kind: Kind, data: &Value) -> Result<TypedValue> {
    let value = match kind {
        Kind::Empty => data.is_null().then_some(TypedValue::Empty),
        Kind::UInt8 => unsigned(data).map(TypedValue::UInt8),
        Kind::Int16 => signed(data).map(TypedValue::Int16),
        Kind::UInt16 => unsigned(data).map(TypedValue::UInt16),
        Kind::Int32 => signed(data).map(TypedValue::Int32),
        Kind::UInt32 => unsigned(data).map(TypedValue::UInt32),
        Kind::Int64 => data.as_i64().map(TypedValue::Int64),
        Kind::UInt64 => data.as_u64().map(TypedValue::UInt64),
        Kind::Single => as_float(data).map(|v| TypedValue::Single(v as f32)),
        Kind::Double => as_float(data).map(TypedValue::Double),
        Kind::Char16 => unsigned(data).map(TypedValue::Char16),
        Kind::Boolean => data.as_bool().map(TypedValue::Boolean),
        Kind::String => data.as_str().map(|s| TypedValue::String(s.to_string())),
        Kind::DateTime => data
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(TypedValue::DateTime),
        Kind::TimeSpan => data.as_i64().map(|t| TypedValue::TimeSpan(TimeSpan(t))),
        Kind::Guid => data
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(TypedValue::Guid),
        Kind::Point => serde_json::from_value(data.clone()).ok().map(TypedValue::Point),
        Kind::Size => serde_json::from_value(data.clone()).ok().map(TypedValue::Size),
        Kind::Rect => serde_json::from_value(data.clone()).ok().map(TypedValue::Rect),
        _ => return Err(AppDataError::UnsupportedType(kind.name().into())),
    };
    value.ok_or_else(|| AppDataError::format(kind.name(), data.to_string()))
}

fn decode_array(kind: Kind, data: &Value) -> Result<TypedValue> {
    let invalid = || AppDataError::format(kind.name(), data.to_string());
    let element = kind.element().ok_or_else(invalid)?;
    let items = data.as_array().ok_or_else(invalid)?;

    macro_rules! collect {
        ($array:ident, $scalar:ident) => {
            TypedValue::$array(
                items
                    .iter()
                    .map(|item| match decode_scalar(element, item)? {
                        TypedValue::$scalar(x) => Ok(x),
                        _ => Err(invalid()),
                    })
                    .collect::<Result<Vec<_>>>()?,
            )
        };
    }

    let value = match kind {
        Kind::UInt8Array => collect!(UInt8Array, UInt8),
        Kind::Int16Array => collect!(Int16Array, Int16),
        Kind::UInt16Array => collect!(UInt16Array, UInt16),
        Kind::Int32Array => collect!(Int32Array, Int32),
        Kind::UInt32Array => collect!(UInt32Array, UInt32),
        Kind::Int64Array => collect!(Int64Array, Int64),
        Kind::UInt64Array => collect!(UInt64Array, UInt64),
        Kind::SingleArray => collect!(SingleArray, Single),
        Kind::DoubleArray => collect!(DoubleArray, Double),
        Kind::Char16Array => collect!(Char16Array, Char16),
        Kind::BooleanArray => collect!(BooleanArray, Boolean),
        Kind::StringArray => collect!(StringArray, String),
        Kind::DateTimeArray => collect!(DateTimeArray, DateTime),
        Kind::TimeSpanArray => collect!(TimeSpanArray, TimeSpan),
        Kind::GuidArray => collect!(GuidArray, Guid),
        Kind::PointArray => collect!(PointArray, Point),
        Kind::SizeArray => collect!(SizeArray, Size),
        Kind::RectArray => collect!(RectArray, Rect),
        _ => return Err(invalid()),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Point;

    fn reload(container: &Container) -> Container {
        let text = serde_json::to_string(&encode(container).unwrap()).unwrap();
        decode(serde_json::from_str(&text).unwrap()).unwrap()
    }

    #[test]
    fn test_layout_uses_kind_names() {
        let root = Container::new("Local").with_value("n", TypedValue::UInt16(7));
        let doc = serde_json::to_value(encode(&root).unwrap()).unwrap();
        assert_eq!(doc["name"], "Local");
        assert_eq!(doc["values"][0]["key"], "n");
        assert_eq!(doc["values"][0]["type"], "UINT16");
        assert_eq!(doc["values"][0]["data"], 7);
    }

    #[test]
    fn test_tree_with_mixed_kinds_survives_reload() {
        let mut window = Composite::new();
        window.insert("pos", TypedValue::Point(Point { x: 1.0, y: 2.5 }));
        window.insert("title", TypedValue::from("main"));
        let root = Container::new("Local")
            .with_value("ratio", TypedValue::Single(f32::NAN))
            .with_value("ids", TypedValue::GuidArray(vec![Uuid::nil()]))
            .with_value("pair", TypedValue::Char16(0xD800))
            .with_child(
                Container::new("ui")
                    .with_value("window", window)
                    .with_value("none", TypedValue::Empty),
            );

        let loaded = reload(&root);
        let ui = loaded.containers().get("ui").unwrap();
        assert_eq!(ui.values(), root.containers().get("ui").unwrap().values());
        assert_eq!(loaded.values().get("pair"), Some(&TypedValue::Char16(0xD800)));
        assert!(matches!(
            loaded.values().get("ratio"),
            Some(TypedValue::Single(v)) if v.is_nan()
        ));
    }

    #[test]
    fn test_unknown_type_name_is_rejected() {
        let stored: StoredContainer = serde_json::from_str(
            r#"{"name":"Local","values":[{"key":"k","type":"HANDLE","data":1}]}"#,
        )
        .unwrap();
        assert!(matches!(
            decode(stored),
            Err(AppDataError::UnsupportedType(name)) if name == "HANDLE"
        ));
    }

    #[test]
    fn test_mismatched_data_is_a_format_error() {
        let stored: StoredContainer = serde_json::from_str(
            r#"{"name":"Local","values":[{"key":"k","type":"UINT8","data":300}]}"#,
        )
        .unwrap();
        assert!(matches!(decode(stored), Err(AppDataError::Format { .. })));
    }

    #[test]
    fn test_nested_composite_is_rejected() {
        let stored: StoredContainer = serde_json::from_str(
            r#"{"name":"Local","values":[{"key":"c","type":"COMPOSITE",
                "data":[{"key":"inner","type":"COMPOSITE","data":[]}]}]}"#,
        )
        .unwrap();
        assert!(matches!(decode(stored), Err(AppDataError::UnsupportedType(_))));
    }
}

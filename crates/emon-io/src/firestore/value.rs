//! Decoding of the Firestore REST value encoding.
//!
//! The REST API wraps every field in a single-key object naming its type,
//! e.g. `{"doubleValue": 1.5}` or `{"mapValue": {"fields": {...}}}`.
//! [`decode_fields`] turns a document's `fields` object into plain JSON so
//! the typed models in `emon-core` can deserialize it with serde.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Errors from decoding a Firestore document body.
#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    #[error("field '{path}': expected a single-key typed value object")]
    NotTyped { path: String },

    #[error("field '{path}': unsupported value type '{kind}'")]
    UnsupportedType { path: String, kind: String },

    #[error("field '{path}': malformed {kind}")]
    Malformed { path: String, kind: &'static str },
}

/// Decode a document body (`{"name": ..., "fields": {...}}`) into a JSON object.
///
/// A document without `fields` decodes to an empty object.
pub fn decode_document(body: &Value) -> Result<Value, ValueError> {
    match body.get("fields") {
        Some(fields) => decode_fields(fields, ""),
        None => Ok(Value::Object(Map::new())),
    }
}

/// Decode a `fields` map.
pub fn decode_fields(fields: &Value, path: &str) -> Result<Value, ValueError> {
    let Some(map) = fields.as_object() else {
        return Err(ValueError::Malformed {
            path: path.to_string(),
            kind: "fields map",
        });
    };

    let mut out = Map::with_capacity(map.len());
    for (key, value) in map {
        let child = join(path, key);
        out.insert(key.clone(), decode_value(value, &child)?);
    }
    Ok(Value::Object(out))
}

/// Decode one typed value.
pub fn decode_value(value: &Value, path: &str) -> Result<Value, ValueError> {
    let (kind, inner) = match value.as_object() {
        Some(obj) if obj.len() == 1 => obj.iter().next().map(|(k, v)| (k.as_str(), v)),
        _ => None,
    }
    .ok_or_else(|| ValueError::NotTyped {
        path: path.to_string(),
    })?;

    let malformed = |kind: &'static str| ValueError::Malformed {
        path: path.to_string(),
        kind,
    };

    match kind {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| malformed("booleanValue")),
        // int64 travels as a decimal string
        "integerValue" => {
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                Value::Number(n) => n.as_i64(),
                _ => None,
            };
            parsed
                .map(|i| Value::Number(i.into()))
                .ok_or_else(|| malformed("integerValue"))
        }
        "doubleValue" => match inner {
            Value::Number(n) => Ok(Value::Number(n.clone())),
            // NaN and infinities have no JSON number form
            Value::String(s) if matches!(s.as_str(), "NaN" | "Infinity" | "-Infinity") => {
                Ok(Value::Null)
            }
            Value::String(s) => s
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| malformed("doubleValue")),
            _ => Err(malformed("doubleValue")),
        },
        "stringValue" | "timestampValue" | "bytesValue" | "referenceValue" => inner
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| malformed("string-like value")),
        "geoPointValue" => {
            let lat = inner.get("latitude").cloned().unwrap_or(Value::from(0.0));
            let lng = inner.get("longitude").cloned().unwrap_or(Value::from(0.0));
            let mut point = Map::new();
            point.insert("latitude".to_string(), lat);
            point.insert("longitude".to_string(), lng);
            Ok(Value::Object(point))
        }
        "arrayValue" => {
            let values = match inner.get("values") {
                None => return Ok(Value::Array(Vec::new())),
                Some(Value::Array(values)) => values,
                Some(_) => return Err(malformed("arrayValue")),
            };
            values
                .iter()
                .enumerate()
                .map(|(i, v)| decode_value(v, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        "mapValue" => match inner.get("fields") {
            None => Ok(Value::Object(Map::new())),
            Some(fields) => decode_fields(fields, path),
        },
        other => Err(ValueError::UnsupportedType {
            path: path.to_string(),
            kind: other.to_string(),
        }),
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generation_document() {
        let body = json!({
            "name": "projects/p/databases/(default)/documents/daily_generation_italy/2026-10-17",
            "fields": {
                "records": {"arrayValue": {"values": [
                    {"mapValue": {"fields": {
                        "psrType": {"stringValue": "B16"},
                        "quantity_MW": {"doubleValue": 100.5},
                        "position": {"integerValue": "3"}
                    }}},
                    {"mapValue": {"fields": {
                        "psrType": {"stringValue": "B19"},
                        "quantity_MW": {"integerValue": "300"}
                    }}}
                ]}},
                "updated_at": {"timestampValue": "2026-10-17T06:00:00.123Z"}
            },
            "createTime": "2026-10-17T06:00:00.123Z"
        });

        let decoded = decode_document(&body).unwrap();
        assert_eq!(
            decoded,
            json!({
                "records": [
                    {"psrType": "B16", "quantity_MW": 100.5, "position": 3},
                    {"psrType": "B19", "quantity_MW": 300}
                ],
                "updated_at": "2026-10-17T06:00:00.123Z"
            })
        );
    }

    #[test]
    fn test_empty_containers() {
        let body = json!({"fields": {
            "records": {"arrayValue": {}},
            "meta": {"mapValue": {}},
            "gone": {"nullValue": null}
        }});
        let decoded = decode_document(&body).unwrap();
        assert_eq!(decoded, json!({"records": [], "meta": {}, "gone": null}));
    }

    #[test]
    fn test_document_without_fields() {
        assert_eq!(decode_document(&json!({"name": "x"})).unwrap(), json!({}));
    }

    #[test]
    fn test_special_doubles_become_null() {
        let v = decode_value(&json!({"doubleValue": "NaN"}), "x").unwrap();
        assert_eq!(v, Value::Null);
    }

    #[test]
    fn test_bad_integer_reports_path() {
        let body = json!({"fields": {"records": {"mapValue": {"fields": {
            "fabbisogno_mwh": {"integerValue": "lots"}
        }}}}});
        let err = decode_document(&body).unwrap_err();
        assert_eq!(
            err,
            ValueError::Malformed {
                path: "records.fabbisogno_mwh".to_string(),
                kind: "integerValue"
            }
        );
    }

    #[test]
    fn test_untyped_value_rejected() {
        let err = decode_value(&json!({"a": 1, "b": 2}), "f").unwrap_err();
        assert!(matches!(err, ValueError::NotTyped { .. }));
        let err = decode_value(&json!({"fancyValue": 1}), "f").unwrap_err();
        assert!(matches!(err, ValueError::UnsupportedType { .. }));
    }
}

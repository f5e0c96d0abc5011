//! Relaxed Extended JSON conversion for BSON values.
//!
//! Plain JSON carries strings, booleans, numbers, arrays, objects, and
//! null directly; every other BSON shape travels inside a `$`-prefixed
//! wrapper object (`$oid`, `$date`, `$numberLong`, `$numberDouble`,
//! `$numberDecimal`, `$binary`, `$undefined`). `Int64` always uses
//! `$numberLong` so the int32/int64 distinction survives the round trip.
//! Object key order is preserved in both directions.

use crate::document::BsonDocument;
use crate::value::{BsonValue, Decimal128};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use docfield_core::CodecError;
use serde_json::{json, Map, Number, Value};

/// Render a BSON value as relaxed Extended JSON.
pub fn bson_to_json(value: &BsonValue) -> Value {
    match value {
        BsonValue::Double(d) => match Number::from_f64(*d) {
            Some(n) => Value::Number(n),
            None => json!({ "$numberDouble": non_finite_repr(*d) }),
        },
        BsonValue::String(s) => Value::String(s.clone()),
        BsonValue::Document(doc) => Value::Object(
            doc.iter()
                .map(|(name, field)| (name.to_string(), bson_to_json(field)))
                .collect(),
        ),
        BsonValue::Array(items) => Value::Array(items.iter().map(bson_to_json).collect()),
        BsonValue::Binary(bytes) => json!({
            "$binary": { "base64": BASE64.encode(bytes), "subType": "00" }
        }),
        BsonValue::ObjectId(oid) => json!({ "$oid": oid.to_string() }),
        BsonValue::Boolean(b) => Value::Bool(*b),
        BsonValue::DateTime(ms) => json!({ "$date": ms }),
        BsonValue::Null => Value::Null,
        BsonValue::Undefined => json!({ "$undefined": true }),
        BsonValue::Int32(i) => Value::Number((*i).into()),
        BsonValue::Int64(i) => json!({ "$numberLong": i.to_string() }),
        BsonValue::Decimal128(d) => json!({ "$numberDecimal": d.as_str() }),
    }
}

/// Read a relaxed Extended JSON value back into BSON.
///
/// Plain integers that fit `i32` become `Int32`; other integrals become
/// `Int64`; remaining numbers become `Double`. A recognized `$`-wrapper
/// with the wrong payload shape is a [`CodecError`]; unrecognized keys,
/// `$`-prefixed or not, read as ordinary document fields.
pub fn json_to_bson(value: &Value) -> Result<BsonValue, CodecError> {
    match value {
        Value::Null => Ok(BsonValue::Null),
        Value::Bool(b) => Ok(BsonValue::Boolean(*b)),
        Value::Number(n) => Ok(number_to_bson(n)),
        Value::String(s) => Ok(BsonValue::String(s.clone())),
        Value::Array(items) => items
            .iter()
            .map(json_to_bson)
            .collect::<Result<Vec<_>, _>>()
            .map(BsonValue::Array),
        Value::Object(map) => object_to_bson(map),
    }
}

fn number_to_bson(n: &Number) -> BsonValue {
    if let Some(i) = n.as_i64() {
        if i >= i64::from(i32::MIN) && i <= i64::from(i32::MAX) {
            return BsonValue::Int32(i as i32);
        }
        return BsonValue::Int64(i);
    }
    BsonValue::Double(n.as_f64().unwrap_or(f64::NAN))
}

fn object_to_bson(map: &Map<String, Value>) -> Result<BsonValue, CodecError> {
    if let Some(wrapped) = wrapper_to_bson(map)? {
        return Ok(wrapped);
    }
    let mut doc = BsonDocument::new();
    for (name, field) in map {
        doc.insert(name.clone(), json_to_bson(field)?);
    }
    Ok(BsonValue::Document(doc))
}

/// Decode a known single-key `$`-wrapper, or return `None` for a plain
/// object. A known wrapper key alongside extra keys is malformed.
fn wrapper_to_bson(map: &Map<String, Value>) -> Result<Option<BsonValue>, CodecError> {
    const WRAPPERS: [&str; 7] = [
        "$oid",
        "$date",
        "$numberLong",
        "$numberDouble",
        "$numberDecimal",
        "$binary",
        "$undefined",
    ];
    let Some(key) = map.keys().find(|k| WRAPPERS.contains(&k.as_str())) else {
        return Ok(None);
    };
    if map.len() != 1 {
        return Err(CodecError::new(format!(
            "malformed {key} wrapper: extra keys"
        )));
    }
    let payload = &map[key.as_str()];
    let malformed = || CodecError::new(format!("malformed {key} wrapper"));
    match key.as_str() {
        "$oid" => {
            let hex = payload.as_str().ok_or_else(malformed)?;
            Ok(Some(BsonValue::ObjectId(hex.parse()?)))
        }
        "$date" => {
            let ms = payload.as_i64().ok_or_else(malformed)?;
            Ok(Some(BsonValue::DateTime(ms)))
        }
        "$numberLong" => {
            let repr = payload.as_str().ok_or_else(malformed)?;
            let i = repr.parse::<i64>().map_err(CodecError::caused)?;
            Ok(Some(BsonValue::Int64(i)))
        }
        "$numberDouble" => {
            let repr = payload.as_str().ok_or_else(malformed)?;
            let d = match repr {
                "NaN" => f64::NAN,
                "Infinity" => f64::INFINITY,
                "-Infinity" => f64::NEG_INFINITY,
                other => other.parse::<f64>().map_err(CodecError::caused)?,
            };
            Ok(Some(BsonValue::Double(d)))
        }
        "$numberDecimal" => {
            let repr = payload.as_str().ok_or_else(malformed)?;
            Ok(Some(BsonValue::Decimal128(Decimal128::new(repr))))
        }
        "$binary" => {
            let body = payload.as_object().ok_or_else(malformed)?;
            let encoded = body
                .get("base64")
                .and_then(Value::as_str)
                .ok_or_else(malformed)?;
            let bytes = BASE64.decode(encoded).map_err(CodecError::caused)?;
            Ok(Some(BsonValue::Binary(bytes)))
        }
        "$undefined" => {
            if payload.as_bool() != Some(true) {
                return Err(malformed());
            }
            Ok(Some(BsonValue::Undefined))
        }
        _ => unreachable!("key came from WRAPPERS"),
    }
}

fn non_finite_repr(d: f64) -> &'static str {
    if d.is_nan() {
        "NaN"
    } else if d > 0.0 {
        "Infinity"
    } else {
        "-Infinity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ObjectId;

    #[test]
    fn scalars_round_trip_through_json() {
        let samples = [
            BsonValue::Null,
            BsonValue::Boolean(true),
            BsonValue::Int32(7),
            BsonValue::Int64(1 << 40),
            BsonValue::Int64(5),
            BsonValue::Double(2.5),
            BsonValue::String("text".into()),
            BsonValue::DateTime(1_700_000_000_000),
            BsonValue::Undefined,
            BsonValue::Binary(vec![0xde, 0xad, 0xbe, 0xef]),
            BsonValue::Decimal128(Decimal128::new("10.99")),
            BsonValue::ObjectId("650a1b2c3d4e5f60718293a4".parse::<ObjectId>().unwrap()),
        ];
        for sample in samples {
            let round = json_to_bson(&bson_to_json(&sample)).expect("decode must succeed");
            assert_eq!(round, sample, "round trip for {sample:?}");
        }
    }

    #[test]
    fn non_finite_doubles_use_the_number_double_wrapper() {
        assert_eq!(
            bson_to_json(&BsonValue::Double(f64::INFINITY)),
            json!({ "$numberDouble": "Infinity" })
        );
        let back = json_to_bson(&json!({ "$numberDouble": "NaN" })).unwrap();
        assert!(matches!(back, BsonValue::Double(d) if d.is_nan()));
    }

    #[test]
    fn key_order_is_preserved() {
        let mut doc = BsonDocument::new();
        doc.insert("z", 1i32);
        doc.insert("a", 2i32);
        let json = bson_to_json(&BsonValue::Document(doc));
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a"]);
    }

    #[test]
    fn malformed_wrappers_are_codec_errors() {
        assert!(json_to_bson(&json!({ "$oid": "nope" })).is_err());
        assert!(json_to_bson(&json!({ "$oid": 12 })).is_err());
        assert!(json_to_bson(&json!({ "$date": "yesterday" })).is_err());
        assert!(json_to_bson(&json!({ "$numberLong": "abc" })).is_err());
        assert!(json_to_bson(&json!({ "$undefined": false })).is_err());
        assert!(json_to_bson(&json!({ "$binary": { "base64": "!!" } })).is_err());
        assert!(json_to_bson(&json!({ "$oid": "650a1b2c3d4e5f60718293a4", "x": 1 })).is_err());
    }

    #[test]
    fn unrecognized_dollar_keys_read_as_plain_fields() {
        let back = json_to_bson(&json!({ "$set": { "a": 1 } })).unwrap();
        let BsonValue::Document(doc) = back else {
            panic!("expected document");
        };
        assert!(doc.contains("$set"));
    }
}

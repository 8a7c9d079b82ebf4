//! Value Codec
//!
//! JSON encoding for cached values, with a type-preserving variant set.

use std::collections::BTreeMap;
use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::Result;

// == Cache Value ==
/// A polymorphic cached value.
///
/// Scalars are written as bare JSON scalars so the store still recognises
/// integers (`INCR`, `HINCRBY`). Composite variants are written as objects
/// carrying an `"@type"` discriminator, so decoding yields the same variant
/// instead of a structural map:
///
/// ```text
/// Text("a")            -> "a"
/// Int(7)               -> 7
/// List([Int(1)])       -> {"@type":"list","items":[1]}
/// Map({"k": Bool(true)}) -> {"@type":"map","entries":{"k":true}}
/// ```
///
/// Non-finite floats have no JSON form and are written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireValue", into = "WireValue")]
pub enum CacheValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<CacheValue>),
    Map(BTreeMap<String, CacheValue>),
}

impl CacheValue {
    /// Returns the text if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CacheValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders values for log output: text unquoted, lists as `[a, b]`, maps as `{k=v}`.
impl fmt::Display for CacheValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheValue::Null => write!(f, "null"),
            CacheValue::Bool(b) => write!(f, "{}", b),
            CacheValue::Int(n) => write!(f, "{}", n),
            CacheValue::Float(n) => write!(f, "{}", n),
            CacheValue::Text(s) => write!(f, "{}", s),
            CacheValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            CacheValue::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for CacheValue {
    fn from(s: &str) -> Self {
        CacheValue::Text(s.to_string())
    }
}

impl From<String> for CacheValue {
    fn from(s: String) -> Self {
        CacheValue::Text(s)
    }
}

impl From<i64> for CacheValue {
    fn from(n: i64) -> Self {
        CacheValue::Int(n)
    }
}

impl From<f64> for CacheValue {
    fn from(n: f64) -> Self {
        CacheValue::Float(n)
    }
}

impl From<bool> for CacheValue {
    fn from(b: bool) -> Self {
        CacheValue::Bool(b)
    }
}

impl From<Vec<CacheValue>> for CacheValue {
    fn from(items: Vec<CacheValue>) -> Self {
        CacheValue::List(items)
    }
}

impl From<BTreeMap<String, CacheValue>> for CacheValue {
    fn from(entries: BTreeMap<String, CacheValue>) -> Self {
        CacheValue::Map(entries)
    }
}

// == Wire Form ==
// Order matters for untagged decoding: Int must be tried before Float.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WireValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Composite(Composite),
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "@type")]
enum Composite {
    #[serde(rename = "list")]
    List { items: Vec<CacheValue> },
    #[serde(rename = "map")]
    Map {
        entries: BTreeMap<String, CacheValue>,
    },
}

impl From<WireValue> for CacheValue {
    fn from(wire: WireValue) -> Self {
        match wire {
            WireValue::Null => CacheValue::Null,
            WireValue::Bool(b) => CacheValue::Bool(b),
            WireValue::Int(n) => CacheValue::Int(n),
            WireValue::Float(n) => CacheValue::Float(n),
            WireValue::Text(s) => CacheValue::Text(s),
            WireValue::Composite(Composite::List { items }) => CacheValue::List(items),
            WireValue::Composite(Composite::Map { entries }) => CacheValue::Map(entries),
        }
    }
}

impl From<CacheValue> for WireValue {
    fn from(value: CacheValue) -> Self {
        match value {
            CacheValue::Null => WireValue::Null,
            CacheValue::Bool(b) => WireValue::Bool(b),
            CacheValue::Int(n) => WireValue::Int(n),
            CacheValue::Float(n) => WireValue::Float(n),
            CacheValue::Text(s) => WireValue::Text(s),
            CacheValue::List(items) => WireValue::Composite(Composite::List { items }),
            CacheValue::Map(entries) => WireValue::Composite(Composite::Map { entries }),
        }
    }
}

// == JSON Codec ==
/// Encodes values, list elements and hash field values as JSON.
///
/// Works with any serde type; [`CacheValue`] is the variant set to use when
/// the concrete type must survive the round trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Encodes a value into the bytes sent to the store.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(value)?)
    }

    /// Decodes bytes read back from the store.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    fn roundtrip(value: &CacheValue) -> CacheValue {
        let codec = JsonCodec;
        let bytes = codec.encode(value).unwrap();
        codec.decode(&bytes).unwrap()
    }

    #[test]
    fn test_scalars_are_bare_json() {
        let codec = JsonCodec;
        assert_eq!(codec.encode(&CacheValue::from("哈哈哈")).unwrap(), "\"哈哈哈\"".as_bytes());
        assert_eq!(codec.encode(&CacheValue::Int(42)).unwrap(), b"42");
        assert_eq!(codec.encode(&CacheValue::Bool(false)).unwrap(), b"false");
        assert_eq!(codec.encode(&CacheValue::Null).unwrap(), b"null");
    }

    #[test]
    fn test_composites_carry_type_tag() {
        let codec = JsonCodec;
        let list = CacheValue::List(vec![CacheValue::Int(1), CacheValue::from("a")]);
        let json: serde_json::Value = serde_json::from_slice(&codec.encode(&list).unwrap()).unwrap();
        assert_eq!(json["@type"], "list");
        assert_eq!(json["items"], serde_json::json!([1, "a"]));
    }

    #[test]
    fn test_int_and_float_keep_their_variant() {
        assert_eq!(roundtrip(&CacheValue::Int(3)), CacheValue::Int(3));
        assert_eq!(roundtrip(&CacheValue::Float(3.0)), CacheValue::Float(3.0));
        assert_eq!(roundtrip(&CacheValue::Float(-0.5)), CacheValue::Float(-0.5));
    }

    #[test]
    fn test_nested_roundtrip() {
        let mut entries = BTreeMap::new();
        entries.insert("name".to_string(), CacheValue::from("嘤嘤嘤"));
        entries.insert(
            "tags".to_string(),
            CacheValue::List(vec![CacheValue::Null, CacheValue::Bool(true)]),
        );
        let value = CacheValue::Map(entries);

        assert_eq!(roundtrip(&value), value);
    }

    #[test]
    fn test_list_does_not_decode_as_map() {
        let value = CacheValue::List(vec![]);
        assert!(matches!(roundtrip(&value), CacheValue::List(items) if items.is_empty()));
    }

    #[test]
    fn test_untagged_object_is_rejected() {
        let codec = JsonCodec;
        let result: Result<CacheValue> = codec.decode(br#"{"items":[1]}"#);
        assert!(matches!(result, Err(CacheError::SerializationFailure(_))));
    }

    #[test]
    fn test_display() {
        let list = CacheValue::List(vec![CacheValue::from("哈哈哈"), CacheValue::Int(2)]);
        assert_eq!(list.to_string(), "[哈哈哈, 2]");

        let mut entries = BTreeMap::new();
        entries.insert("a".to_string(), CacheValue::Null);
        assert_eq!(CacheValue::Map(entries).to_string(), "{a=null}");
    }

    #[test]
    fn test_plain_serde_types() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let codec = JsonCodec;
        let bytes = codec.encode(&Point { x: 1, y: -2 }).unwrap();
        let decoded: Point = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, Point { x: 1, y: -2 });
    }
}

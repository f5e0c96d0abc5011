//! The BSON element sum type and its scalar wrappers.

use crate::document::BsonDocument;
use docfield_core::{CodecError, Element};
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// One BSON-flavored document element.
///
/// This is the closed sum the codec algebra converts within: plain decoded
/// values and encoded document elements both travel as `BsonValue`.
/// `Null` is the explicit-null sentinel and `Undefined` the absent-field
/// sentinel; both read as absent to nullable codecs.
#[derive(Debug, Clone, PartialEq)]
pub enum BsonValue {
    Double(f64),
    String(String),
    Document(BsonDocument),
    Array(Vec<BsonValue>),
    Binary(Vec<u8>),
    ObjectId(ObjectId),
    Boolean(bool),
    /// Milliseconds since the unix epoch.
    DateTime(i64),
    Null,
    Undefined,
    Int32(i32),
    Int64(i64),
    Decimal128(Decimal128),
}

impl Element for BsonValue {
    fn type_name(&self) -> &'static str {
        match self {
            BsonValue::Double(_) => "double",
            BsonValue::String(_) => "string",
            BsonValue::Document(_) => "document",
            BsonValue::Array(_) => "array",
            BsonValue::Binary(_) => "binary",
            BsonValue::ObjectId(_) => "objectId",
            BsonValue::Boolean(_) => "boolean",
            BsonValue::DateTime(_) => "dateTime",
            BsonValue::Null => "null",
            BsonValue::Undefined => "undefined",
            BsonValue::Int32(_) => "int32",
            BsonValue::Int64(_) => "int64",
            BsonValue::Decimal128(_) => "decimal128",
        }
    }

    fn null() -> Self {
        BsonValue::Null
    }

    fn is_null(&self) -> bool {
        matches!(self, BsonValue::Null)
    }

    fn is_absent(&self) -> bool {
        matches!(self, BsonValue::Null | BsonValue::Undefined)
    }
}

impl From<&str> for BsonValue {
    fn from(value: &str) -> Self {
        BsonValue::String(value.to_string())
    }
}

impl From<String> for BsonValue {
    fn from(value: String) -> Self {
        BsonValue::String(value)
    }
}

impl From<bool> for BsonValue {
    fn from(value: bool) -> Self {
        BsonValue::Boolean(value)
    }
}

impl From<i32> for BsonValue {
    fn from(value: i32) -> Self {
        BsonValue::Int32(value)
    }
}

impl From<i64> for BsonValue {
    fn from(value: i64) -> Self {
        BsonValue::Int64(value)
    }
}

impl From<f64> for BsonValue {
    fn from(value: f64) -> Self {
        BsonValue::Double(value)
    }
}

impl From<ObjectId> for BsonValue {
    fn from(value: ObjectId) -> Self {
        BsonValue::ObjectId(value)
    }
}

impl From<Decimal128> for BsonValue {
    fn from(value: Decimal128) -> Self {
        BsonValue::Decimal128(value)
    }
}

impl From<BsonDocument> for BsonValue {
    fn from(value: BsonDocument) -> Self {
        BsonValue::Document(value)
    }
}

impl From<Vec<BsonValue>> for BsonValue {
    fn from(value: Vec<BsonValue>) -> Self {
        BsonValue::Array(value)
    }
}

/// A 12-byte BSON ObjectId.
///
/// Rendered as 24 lowercase hex digits. [`ObjectId::generate`] produces a
/// fresh id from the current unix time plus 8 random bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// The creation timestamp embedded in the leading 4 bytes, as unix
    /// seconds.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// Generate a fresh id.
    pub fn generate() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as u32)
            .unwrap_or(0);
        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        rand::thread_rng().fill(&mut bytes[4..]);
        Self(bytes)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for ObjectId {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 24 || !s.is_ascii() {
            return Err(CodecError::new(format!("invalid ObjectId `{s}`")));
        }
        let mut bytes = [0u8; 12];
        for (i, out) in bytes.iter_mut().enumerate() {
            *out = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|_| CodecError::new(format!("invalid ObjectId `{s}`")))?;
        }
        Ok(Self(bytes))
    }
}

/// A high-precision decimal value, carried as its canonical string form.
///
/// This crate passes decimal values through opaquely; it does not
/// implement IEEE 754-2008 decimal arithmetic or normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal128(String);

impl Decimal128 {
    pub fn new(repr: impl Into<String>) -> Self {
        Self(repr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Decimal128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

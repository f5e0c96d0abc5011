//! Leaf, container, and value-table codecs over [`BsonValue`].
//!
//! Every leaf codec is safe-dispatch plus a one-line conversion: the
//! shape witnesses below are the runtime type tests, and a non-matching
//! element becomes a mismatch [`CodecError`] before any conversion runs.

use crate::document::BsonDocument;
use crate::value::{BsonValue, Decimal128, ObjectId};
use docfield_core::{try_dispatch, Codec, CodecError, Shape};

impl Shape<BsonValue> for String {
    const EXPECTED: &'static str = "string";

    fn extract(element: &BsonValue) -> Option<Self> {
        match element {
            BsonValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl Shape<BsonValue> for bool {
    const EXPECTED: &'static str = "boolean";

    fn extract(element: &BsonValue) -> Option<Self> {
        match element {
            BsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl Shape<BsonValue> for i32 {
    const EXPECTED: &'static str = "int32";

    fn extract(element: &BsonValue) -> Option<Self> {
        match element {
            BsonValue::Int32(i) => Some(*i),
            _ => None,
        }
    }
}

impl Shape<BsonValue> for i64 {
    const EXPECTED: &'static str = "int64";

    fn extract(element: &BsonValue) -> Option<Self> {
        match element {
            BsonValue::Int64(i) => Some(*i),
            _ => None,
        }
    }
}

impl Shape<BsonValue> for f64 {
    const EXPECTED: &'static str = "double";

    fn extract(element: &BsonValue) -> Option<Self> {
        match element {
            BsonValue::Double(d) => Some(*d),
            _ => None,
        }
    }
}

impl Shape<BsonValue> for ObjectId {
    const EXPECTED: &'static str = "objectId";

    fn extract(element: &BsonValue) -> Option<Self> {
        match element {
            BsonValue::ObjectId(oid) => Some(*oid),
            _ => None,
        }
    }
}

impl Shape<BsonValue> for Decimal128 {
    const EXPECTED: &'static str = "decimal128";

    fn extract(element: &BsonValue) -> Option<Self> {
        match element {
            BsonValue::Decimal128(d) => Some(d.clone()),
            _ => None,
        }
    }
}

impl Shape<BsonValue> for BsonDocument {
    const EXPECTED: &'static str = "document";

    fn extract(element: &BsonValue) -> Option<Self> {
        match element {
            BsonValue::Document(doc) => Some(doc.clone()),
            _ => None,
        }
    }
}

impl Shape<BsonValue> for Vec<BsonValue> {
    const EXPECTED: &'static str = "array";

    fn extract(element: &BsonValue) -> Option<Self> {
        match element {
            BsonValue::Array(items) => Some(items.clone()),
            _ => None,
        }
    }
}

impl Shape<BsonValue> for Vec<u8> {
    const EXPECTED: &'static str = "binary";

    fn extract(element: &BsonValue) -> Option<Self> {
        match element {
            BsonValue::Binary(bytes) => Some(bytes.clone()),
            _ => None,
        }
    }
}

/// Shape witness for the `DateTime` variant, distinct from the plain
/// `i64` witness that means `Int64`.
pub struct DateTimeMillis(pub i64);

impl Shape<BsonValue> for DateTimeMillis {
    const EXPECTED: &'static str = "dateTime";

    fn extract(element: &BsonValue) -> Option<Self> {
        match element {
            BsonValue::DateTime(ms) => Some(DateTimeMillis(*ms)),
            _ => None,
        }
    }
}

pub struct StringCodec;

impl Codec for StringCodec {
    type Item = String;
    type Elem = BsonValue;

    fn encode(&self, value: &BsonValue) -> Result<BsonValue, CodecError> {
        try_dispatch(value, |s: String| Ok(BsonValue::String(s)))
    }

    fn decode(&self, value: &BsonValue) -> Result<String, CodecError> {
        try_dispatch(value, |s: String| Ok(s))
    }
}

pub struct BooleanCodec;

impl Codec for BooleanCodec {
    type Item = bool;
    type Elem = BsonValue;

    fn encode(&self, value: &BsonValue) -> Result<BsonValue, CodecError> {
        try_dispatch(value, |b: bool| Ok(BsonValue::Boolean(b)))
    }

    fn decode(&self, value: &BsonValue) -> Result<bool, CodecError> {
        try_dispatch(value, |b: bool| Ok(b))
    }
}

pub struct Int32Codec;

impl Codec for Int32Codec {
    type Item = i32;
    type Elem = BsonValue;

    fn encode(&self, value: &BsonValue) -> Result<BsonValue, CodecError> {
        try_dispatch(value, |i: i32| Ok(BsonValue::Int32(i)))
    }

    fn decode(&self, value: &BsonValue) -> Result<i32, CodecError> {
        try_dispatch(value, |i: i32| Ok(i))
    }
}

pub struct Int64Codec;

impl Codec for Int64Codec {
    type Item = i64;
    type Elem = BsonValue;

    fn encode(&self, value: &BsonValue) -> Result<BsonValue, CodecError> {
        try_dispatch(value, |i: i64| Ok(BsonValue::Int64(i)))
    }

    fn decode(&self, value: &BsonValue) -> Result<i64, CodecError> {
        try_dispatch(value, |i: i64| Ok(i))
    }
}

pub struct DoubleCodec;

impl Codec for DoubleCodec {
    type Item = f64;
    type Elem = BsonValue;

    fn encode(&self, value: &BsonValue) -> Result<BsonValue, CodecError> {
        try_dispatch(value, |d: f64| Ok(BsonValue::Double(d)))
    }

    fn decode(&self, value: &BsonValue) -> Result<f64, CodecError> {
        try_dispatch(value, |d: f64| Ok(d))
    }
}

pub struct Decimal128Codec;

impl Codec for Decimal128Codec {
    type Item = Decimal128;
    type Elem = BsonValue;

    fn encode(&self, value: &BsonValue) -> Result<BsonValue, CodecError> {
        try_dispatch(value, |d: Decimal128| Ok(BsonValue::Decimal128(d)))
    }

    fn decode(&self, value: &BsonValue) -> Result<Decimal128, CodecError> {
        try_dispatch(value, |d: Decimal128| Ok(d))
    }
}

/// Epoch-millisecond datetimes. Encodes a plain `Int64` element into a
/// `DateTime` element and decodes back to the raw millisecond count.
pub struct DateTimeCodec;

impl Codec for DateTimeCodec {
    type Item = i64;
    type Elem = BsonValue;

    fn encode(&self, value: &BsonValue) -> Result<BsonValue, CodecError> {
        try_dispatch(value, |ms: i64| Ok(BsonValue::DateTime(ms)))
    }

    fn decode(&self, value: &BsonValue) -> Result<i64, CodecError> {
        try_dispatch(value, |ms: DateTimeMillis| Ok(ms.0))
    }
}

pub struct ObjectIdCodec;

impl Codec for ObjectIdCodec {
    type Item = ObjectId;
    type Elem = BsonValue;

    fn encode(&self, value: &BsonValue) -> Result<BsonValue, CodecError> {
        try_dispatch(value, |oid: ObjectId| Ok(BsonValue::ObjectId(oid)))
    }

    fn decode(&self, value: &BsonValue) -> Result<ObjectId, CodecError> {
        try_dispatch(value, |oid: ObjectId| Ok(oid))
    }
}

pub struct BinaryCodec;

impl Codec for BinaryCodec {
    type Item = Vec<u8>;
    type Elem = BsonValue;

    fn encode(&self, value: &BsonValue) -> Result<BsonValue, CodecError> {
        try_dispatch(value, |bytes: Vec<u8>| Ok(BsonValue::Binary(bytes)))
    }

    fn decode(&self, value: &BsonValue) -> Result<Vec<u8>, CodecError> {
        try_dispatch(value, |bytes: Vec<u8>| Ok(bytes))
    }
}

/// Identity codec for embedded documents.
pub struct DocumentCodec;

impl Codec for DocumentCodec {
    type Item = BsonDocument;
    type Elem = BsonValue;

    fn encode(&self, value: &BsonValue) -> Result<BsonValue, CodecError> {
        try_dispatch(value, |doc: BsonDocument| Ok(BsonValue::Document(doc)))
    }

    fn decode(&self, value: &BsonValue) -> Result<BsonDocument, CodecError> {
        try_dispatch(value, |doc: BsonDocument| Ok(doc))
    }
}

/// Element-wise codec over `Array` elements.
///
/// The first failing element aborts the whole conversion with its error.
pub struct ArrayCodec<C> {
    codec: C,
}

impl<C> ArrayCodec<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }
}

impl<C> Codec for ArrayCodec<C>
where
    C: Codec<Elem = BsonValue>,
{
    type Item = Vec<C::Item>;
    type Elem = BsonValue;

    fn encode(&self, value: &BsonValue) -> Result<BsonValue, CodecError> {
        try_dispatch(value, |items: Vec<BsonValue>| {
            let mut out = Vec::with_capacity(items.len());
            for item in &items {
                out.push(self.codec.encode(item)?);
            }
            Ok(BsonValue::Array(out))
        })
    }

    fn decode(&self, value: &BsonValue) -> Result<Vec<C::Item>, CodecError> {
        try_dispatch(value, |items: Vec<BsonValue>| {
            items.iter().map(|item| self.codec.decode(item)).collect()
        })
    }
}

/// A finite value-table codec: a closed list of `(decoded, encoded)`
/// element pairs.
///
/// A value missing from the table in either direction is a [`CodecError`],
/// the same error family as every other conversion failure.
pub struct EnumCodec {
    pairs: Vec<(BsonValue, BsonValue)>,
}

impl EnumCodec {
    pub fn new(pairs: impl IntoIterator<Item = (BsonValue, BsonValue)>) -> Self {
        Self {
            pairs: pairs.into_iter().collect(),
        }
    }
}

impl Codec for EnumCodec {
    type Item = BsonValue;
    type Elem = BsonValue;

    fn encode(&self, value: &BsonValue) -> Result<BsonValue, CodecError> {
        self.pairs
            .iter()
            .find(|(decoded, _)| decoded == value)
            .map(|(_, encoded)| encoded.clone())
            .ok_or_else(|| CodecError::new(format!("enum mismatch: {value:?}")))
    }

    fn decode(&self, value: &BsonValue) -> Result<BsonValue, CodecError> {
        self.pairs
            .iter()
            .find(|(_, encoded)| encoded == value)
            .map(|(decoded, _)| decoded.clone())
            .ok_or_else(|| CodecError::new(format!("enum mismatch: {value:?}")))
    }
}

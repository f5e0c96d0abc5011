//! BSON-flavored document values and the leaf codecs that drive the
//! docfield codec algebra against them.
//!
//! [`BsonValue`] is the host element sum type, [`BsonDocument`] the
//! ordered keyed container, and the codecs in this crate are the leaves
//! the `docfield-core` wrappers and combinators compose over. A typical
//! schema declares named codecs once and reuses them:
//!
//! ```
//! use docfield_bson::{BsonDocument, BsonValue, Int32Codec, StringCodec};
//! use docfield_core::CodecExt;
//!
//! let name = StringCodec.named("name");
//! let score = Int32Codec.named("score").default_in(0);
//!
//! let mut doc = BsonDocument::new();
//! doc.write(&name, &BsonValue::String("amy".into())).unwrap();
//! assert_eq!(doc.read(&score).unwrap(), 0); // missing field, defaulted
//! ```

mod codecs;
mod document;
mod ejson;
mod value;

pub use codecs::{
    ArrayCodec, BinaryCodec, BooleanCodec, DateTimeCodec, DateTimeMillis, Decimal128Codec,
    DocumentCodec, DoubleCodec, EnumCodec, Int32Codec, Int64Codec, ObjectIdCodec, StringCodec,
};
pub use document::BsonDocument;
pub use ejson::{bson_to_json, json_to_bson};
pub use value::{BsonValue, Decimal128, ObjectId};

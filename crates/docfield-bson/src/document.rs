//! Insertion-ordered BSON documents with codec-aware field access.

use crate::value::BsonValue;
use docfield_core::{Codec, CodecError, FieldCodec};
use indexmap::IndexMap;

/// An ordered string-keyed map of [`BsonValue`]s.
///
/// Field order is preserved across insertion, iteration, and JSON
/// conversion. [`BsonDocument::read`] and [`BsonDocument::write`] route
/// field access through a named codec; a missing field reads as
/// [`BsonValue::Undefined`], so nullable field codecs decode it to `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BsonDocument {
    fields: IndexMap<String, BsonValue>,
}

impl BsonDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<BsonValue>,
    ) -> Option<BsonValue> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&BsonValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Removes a field, preserving the order of the remaining ones.
    pub fn remove(&mut self, name: &str) -> Option<BsonValue> {
        self.fields.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BsonValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Decode the field addressed by `field`.
    ///
    /// A missing field reads as [`BsonValue::Undefined`]; pair the codec
    /// with [`nullable`](docfield_core::CodecExt::nullable) or
    /// [`default_in`](docfield_core::CodecExt::default_in) to make absence
    /// well-formed.
    pub fn read<C>(&self, field: &FieldCodec<C>) -> Result<C::Item, CodecError>
    where
        C: Codec<Elem = BsonValue>,
    {
        let value = self.get(field.name()).unwrap_or(&BsonValue::Undefined);
        field.decode(value)
    }

    /// Encode `value` through `field` and store it under the field's name.
    pub fn write<C>(&mut self, field: &FieldCodec<C>, value: &BsonValue) -> Result<(), CodecError>
    where
        C: Codec<Elem = BsonValue>,
    {
        let encoded = field.encode(value)?;
        self.fields.insert(field.name().to_string(), encoded);
        Ok(())
    }
}

impl FromIterator<(String, BsonValue)> for BsonDocument {
    fn from_iter<T: IntoIterator<Item = (String, BsonValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::{Int64Codec, StringCodec};
    use docfield_core::CodecExt;

    #[test]
    fn insertion_order_is_preserved() {
        let mut doc = BsonDocument::new();
        doc.insert("z", 1i32);
        doc.insert("a", 2i32);
        doc.insert("m", 3i32);
        let names: Vec<&str> = doc.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["z", "a", "m"]);
    }

    #[test]
    fn read_and_write_go_through_the_field_codec() {
        let name = StringCodec.named("name");
        let mut doc = BsonDocument::new();
        doc.write(&name, &BsonValue::String("amy".into()))
            .expect("string encodes");

        assert_eq!(doc.get("name"), Some(&BsonValue::String("amy".into())));
        assert_eq!(doc.read(&name).unwrap(), "amy");

        // Writing a mismatched value is refused and leaves the document alone.
        assert!(doc.write(&name, &BsonValue::Int32(7)).is_err());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn missing_field_reads_as_undefined() {
        let doc = BsonDocument::new();
        let age = Int64Codec.named("age");
        assert!(doc.read(&age).is_err());
        assert_eq!(doc.read(&age.nullable()).unwrap(), None);
    }
}

//! Field naming wrapper: a codec plus the document field it addresses.

use crate::combinator::{CatchIn, CatchOut, DefaultIn, DefaultOut};
use crate::{Codec, CodecError, NullableCodec};

/// A codec responsible for the document field called `name`.
///
/// Delegates conversion to the inner codec untouched; only the name is
/// added. Nested paths are addressed with [`FieldCodec::nested`] and
/// per-locale variants with [`FieldCodec::tagged`]. The combinator methods
/// re-wrap under the same name so a named codec stays named after
/// decoration.
#[derive(Debug, Clone)]
pub struct FieldCodec<C> {
    name: String,
    codec: C,
}

impl<C> FieldCodec<C> {
    /// Associate `name` with an existing codec.
    pub fn new(name: impl Into<String>, codec: C) -> Self {
        Self {
            name: name.into(),
            codec,
        }
    }

    /// The name of the field this codec addresses.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The inner codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Unwrap the inner codec.
    pub fn into_inner(self) -> C {
        self.codec
    }

    /// Address a field nested under this one.
    ///
    /// The result is named with the dotted concatenation of both names and
    /// converts exactly the way `other` does: `"a"` nested with `"b"`
    /// addresses `"a.b"` with `b`'s conversion behavior.
    pub fn nested<D>(&self, other: FieldCodec<D>) -> FieldCodec<D> {
        FieldCodec {
            name: format!("{}.{}", self.name, other.name),
            codec: other.codec,
        }
    }

    /// Address the per-locale variant of this field: `name` becomes
    /// `name#tag`. An empty tag returns the receiver unchanged.
    pub fn tagged(self, tag: &str) -> Self {
        if tag.is_empty() {
            return self;
        }
        FieldCodec {
            name: tag_name(&self.name, tag),
            codec: self.codec,
        }
    }
}

impl<C: Codec> FieldCodec<C> {
    /// [`CodecExt::nullable`](crate::CodecExt::nullable), keeping the name.
    pub fn nullable(self) -> FieldCodec<NullableCodec<C>> {
        FieldCodec {
            name: self.name,
            codec: NullableCodec::new(self.codec),
        }
    }

    /// [`CodecExt::default_in`](crate::CodecExt::default_in), keeping the name.
    pub fn default_in(self, fallback: C::Item) -> FieldCodec<DefaultIn<C>>
    where
        C::Item: Clone,
    {
        FieldCodec {
            name: self.name,
            codec: DefaultIn::new(self.codec, fallback),
        }
    }

    /// [`CodecExt::catch_in`](crate::CodecExt::catch_in), keeping the name.
    pub fn catch_in<F>(self, recover: F) -> FieldCodec<CatchIn<C, F>>
    where
        F: Fn(CodecError) -> Result<C::Item, CodecError>,
    {
        FieldCodec {
            name: self.name,
            codec: CatchIn::new(self.codec, recover),
        }
    }

    /// [`CodecExt::default_out`](crate::CodecExt::default_out), keeping the name.
    pub fn default_out(self, fallback: C::Elem) -> FieldCodec<DefaultOut<C>> {
        FieldCodec {
            name: self.name,
            codec: DefaultOut::new(self.codec, fallback),
        }
    }

    /// [`CodecExt::catch_out`](crate::CodecExt::catch_out), keeping the name.
    pub fn catch_out<F>(self, recover: F) -> FieldCodec<CatchOut<C, F>>
    where
        F: Fn(CodecError) -> Result<C::Elem, CodecError>,
    {
        FieldCodec {
            name: self.name,
            codec: CatchOut::new(self.codec, recover),
        }
    }
}

impl<C: Codec> Codec for FieldCodec<C> {
    type Item = C::Item;
    type Elem = C::Elem;

    fn encode(&self, value: &Self::Elem) -> Result<Self::Elem, CodecError> {
        self.codec.encode(value)
    }

    fn decode(&self, value: &Self::Elem) -> Result<Self::Item, CodecError> {
        self.codec.decode(value)
    }
}

/// Tag a field name with a language tag: `tag_name("title", "en")` is
/// `"title#en"`. An empty tag leaves the name unchanged.
pub fn tag_name(name: &str, tag: &str) -> String {
    if tag.is_empty() {
        return name.to_string();
    }
    format!("{name}#{tag}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testval::{IntCodec, StrCodec, TestValue};
    use crate::try_decode;

    #[test]
    fn naming_does_not_alter_conversion() {
        let field = FieldCodec::new("age", IntCodec);
        assert_eq!(field.name(), "age");
        assert_eq!(try_decode(&TestValue::Int(30), &field).unwrap(), 30);
        assert!(try_decode(&TestValue::Str("x".into()), &field).is_err());
    }

    #[test]
    fn nested_concatenates_names_and_keeps_the_second_behavior() {
        let outer = FieldCodec::new("a", StrCodec);
        let inner = FieldCodec::new("b", IntCodec);
        let nested = outer.nested(inner);

        assert_eq!(nested.name(), "a.b");
        // Converts like the inner int codec, not the outer string codec.
        assert_eq!(try_decode(&TestValue::Int(9), &nested).unwrap(), 9);
        assert!(try_decode(&TestValue::Str("s".into()), &nested).is_err());
    }

    #[test]
    fn empty_tag_is_a_no_op() {
        let field = FieldCodec::new("title", StrCodec);
        let same = field.tagged("");
        assert_eq!(same.name(), "title");

        let tagged = same.tagged("en");
        assert_eq!(tagged.name(), "title#en");
        assert_eq!(
            try_decode(&TestValue::Str("hello".into()), &tagged).unwrap(),
            "hello"
        );
    }

    #[test]
    fn tag_name_matches_the_field_level_operation() {
        assert_eq!(tag_name("title", ""), "title");
        assert_eq!(tag_name("title", "ar"), "title#ar");
    }
}

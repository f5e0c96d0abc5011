//! Composable fallible codec algebra for keyed document models.
//!
//! A [`Codec`] pairs two fallible conversions over a host element model:
//! `encode` lifts a decoded value into the host element universe and
//! `decode` recovers it. Wrappers ([`FieldCodec`], [`NullableCodec`]) and
//! the failure-recovery combinators ([`CodecExt`]) compose codecs without
//! ever mutating them; every composition step builds a new immutable
//! decorator around the previous one, so any codec is safe to share and
//! call concurrently.
//!
//! The host element universe is a closed sum the host crate supplies (see
//! [`Element`]); runtime shape checks against it go through the
//! safe-dispatch helpers in [`try_dispatch`] / [`try_dispatch_catching`],
//! which normalize every failure into the single [`CodecError`] kind.

mod combinator;
mod dispatch;
mod error;
mod field;
mod nullable;

#[cfg(test)]
pub(crate) mod testval;

pub use combinator::{CatchIn, CatchOut, CodecExt, DefaultIn, DefaultOut};
pub use dispatch::{try_dispatch, try_dispatch_catching, Shape};
pub use error::CodecError;
pub use field::{tag_name, FieldCodec};
pub use nullable::NullableCodec;

use std::fmt;

/// Host element model a codec converts against.
///
/// Implemented once per document model by the crate that owns the element
/// sum type. The codec algebra needs three things from it: a type name for
/// mismatch messages, the explicit-null sentinel, and the wider "absent"
/// test that also covers a document-undefined sentinel when the model has
/// one.
pub trait Element: Clone + PartialEq + fmt::Debug {
    /// Name of this element's shape, used in mismatch error messages.
    fn type_name(&self) -> &'static str;

    /// The model's explicit-null sentinel.
    fn null() -> Self;

    /// Whether this element is the explicit-null sentinel.
    fn is_null(&self) -> bool;

    /// Whether this element means "no value": explicit null, or the
    /// model's undefined/absent sentinel when it has one.
    fn is_absent(&self) -> bool {
        self.is_null()
    }
}

/// A fallible bidirectional converter between a decoded type and a host
/// element representation.
///
/// `encode` receives the decoded value carried inside the element sum and
/// produces its encoded element; `decode` is the mirror. Both report every
/// failure, including shape mismatches, as [`CodecError`] results rather
/// than panicking. Implementations must be pure: the same input always
/// yields the same output or the same failure.
pub trait Codec {
    /// The decoded type this codec produces.
    type Item;
    /// The host element universe this codec converts within.
    type Elem: Element;

    /// Encode the decoded value held by `value` into its element form.
    fn encode(&self, value: &Self::Elem) -> Result<Self::Elem, CodecError>;

    /// Decode `value` back into [`Codec::Item`].
    fn decode(&self, value: &Self::Elem) -> Result<Self::Item, CodecError>;
}

impl<C: Codec + ?Sized> Codec for &C {
    type Item = C::Item;
    type Elem = C::Elem;

    fn encode(&self, value: &Self::Elem) -> Result<Self::Elem, CodecError> {
        (**self).encode(value)
    }

    fn decode(&self, value: &Self::Elem) -> Result<Self::Item, CodecError> {
        (**self).decode(value)
    }
}

impl<C: Codec + ?Sized> Codec for Box<C> {
    type Item = C::Item;
    type Elem = C::Elem;

    fn encode(&self, value: &Self::Elem) -> Result<Self::Elem, CodecError> {
        (**self).encode(value)
    }

    fn decode(&self, value: &Self::Elem) -> Result<Self::Item, CodecError> {
        (**self).decode(value)
    }
}

/// Encode `value` with `codec`, returning the result for the caller to
/// branch on.
pub fn try_encode<C: Codec>(value: &C::Elem, codec: &C) -> Result<C::Elem, CodecError> {
    codec.encode(value)
}

/// Decode `value` with `codec`, returning the result for the caller to
/// branch on.
pub fn try_decode<C: Codec>(value: &C::Elem, codec: &C) -> Result<C::Item, CodecError> {
    codec.decode(value)
}

/// Encode `value` with `codec`, unwrapping the result.
///
/// # Panics
///
/// Panics with the [`CodecError`] display when encoding fails. Use
/// [`try_encode`] at call sites that want to recover.
pub fn encode<C: Codec>(value: &C::Elem, codec: &C) -> C::Elem {
    match codec.encode(value) {
        Ok(encoded) => encoded,
        Err(err) => panic!("{err}"),
    }
}

/// Decode `value` with `codec`, unwrapping the result.
///
/// # Panics
///
/// Panics with the [`CodecError`] display when decoding fails. Use
/// [`try_decode`] at call sites that want to recover.
pub fn decode<C: Codec>(value: &C::Elem, codec: &C) -> C::Item {
    match codec.decode(value) {
        Ok(decoded) => decoded,
        Err(err) => panic!("{err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::testval::{IntCodec, StrCodec, TestValue};
    use super::*;

    #[test]
    fn try_conventions_return_results() {
        let ok = try_decode(&TestValue::Str("x".into()), &StrCodec);
        assert_eq!(ok.expect("string decode must succeed"), "x");

        let err = try_decode(&TestValue::Int(3), &StrCodec);
        assert!(err.is_err(), "mismatch must be a failed result, not a panic");
    }

    #[test]
    fn unwrapping_conventions_return_values() {
        assert_eq!(decode(&TestValue::Int(7), &IntCodec), 7);
        assert_eq!(
            encode(&TestValue::Str("y".into()), &StrCodec),
            TestValue::Str("y".into())
        );
    }

    #[test]
    #[should_panic(expected = "expected string")]
    fn unwrapping_decode_panics_with_codec_error_message() {
        decode(&TestValue::Int(1), &StrCodec);
    }

    #[test]
    fn codecs_compose_behind_references_and_boxes() {
        let shared = &IntCodec;
        assert_eq!(try_decode(&TestValue::Int(5), &shared).unwrap(), 5);

        let boxed: Box<dyn Codec<Item = i64, Elem = TestValue>> = Box::new(IntCodec);
        assert_eq!(try_decode(&TestValue::Int(5), &boxed).unwrap(), 5);
    }
}

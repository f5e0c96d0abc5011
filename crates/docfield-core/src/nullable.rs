//! Nullable lifting over a host model's absence sentinels.

use crate::{Codec, CodecError, Element};

/// Lifts a codec over mandatory values into one tolerant of absence.
///
/// Decoding any absent element (explicit null or the model's undefined
/// sentinel) short-circuits to `Ok(None)` without consulting the inner
/// codec; encoding the explicit-null element short-circuits to the null
/// sentinel. Everything else delegates.
#[derive(Debug, Clone)]
pub struct NullableCodec<C> {
    codec: C,
}

impl<C> NullableCodec<C> {
    /// Lift `codec` into its nullable form.
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// The inner codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Unwrap the inner codec.
    pub fn into_inner(self) -> C {
        self.codec
    }
}

impl<C: Codec> Codec for NullableCodec<C> {
    type Item = Option<C::Item>;
    type Elem = C::Elem;

    fn encode(&self, value: &Self::Elem) -> Result<Self::Elem, CodecError> {
        if value.is_null() {
            return Ok(<C::Elem as Element>::null());
        }
        self.codec.encode(value)
    }

    fn decode(&self, value: &Self::Elem) -> Result<Self::Item, CodecError> {
        if value.is_absent() {
            return Ok(None);
        }
        self.codec.decode(value).map(Some)
    }
}

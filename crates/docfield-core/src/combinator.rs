//! Failure-recovery combinators.
//!
//! Each combinator decorates exactly one conversion direction and passes
//! the other straight through, so decode and encode recovery policies stay
//! independently configurable and chainable:
//! `codec.default_in(x).catch_out(f)` layers each policy over its own
//! direction only.

use crate::{Codec, CodecError, FieldCodec, NullableCodec};

/// Decode failures recover to a fixed fallback value; encode untouched.
pub struct DefaultIn<C: Codec> {
    codec: C,
    fallback: C::Item,
}

impl<C: Codec> DefaultIn<C> {
    pub fn new(codec: C, fallback: C::Item) -> Self {
        Self { codec, fallback }
    }
}

impl<C: Codec> Codec for DefaultIn<C>
where
    C::Item: Clone,
{
    type Item = C::Item;
    type Elem = C::Elem;

    fn encode(&self, value: &Self::Elem) -> Result<Self::Elem, CodecError> {
        self.codec.encode(value)
    }

    fn decode(&self, value: &Self::Elem) -> Result<Self::Item, CodecError> {
        match self.codec.decode(value) {
            Ok(decoded) => Ok(decoded),
            Err(_) => Ok(self.fallback.clone()),
        }
    }
}

/// Decode failures recover through a closure; encode untouched.
///
/// The closure itself may fail; its failure becomes this layer's result.
pub struct CatchIn<C, F> {
    codec: C,
    recover: F,
}

impl<C, F> CatchIn<C, F> {
    pub fn new(codec: C, recover: F) -> Self {
        Self { codec, recover }
    }
}

impl<C, F> Codec for CatchIn<C, F>
where
    C: Codec,
    F: Fn(CodecError) -> Result<C::Item, CodecError>,
{
    type Item = C::Item;
    type Elem = C::Elem;

    fn encode(&self, value: &Self::Elem) -> Result<Self::Elem, CodecError> {
        self.codec.encode(value)
    }

    fn decode(&self, value: &Self::Elem) -> Result<Self::Item, CodecError> {
        self.codec.decode(value).or_else(|err| (self.recover)(err))
    }
}

/// Encode failures recover to a fixed fallback element; decode untouched.
pub struct DefaultOut<C: Codec> {
    codec: C,
    fallback: C::Elem,
}

impl<C: Codec> DefaultOut<C> {
    pub fn new(codec: C, fallback: C::Elem) -> Self {
        Self { codec, fallback }
    }
}

impl<C: Codec> Codec for DefaultOut<C> {
    type Item = C::Item;
    type Elem = C::Elem;

    fn encode(&self, value: &Self::Elem) -> Result<Self::Elem, CodecError> {
        match self.codec.encode(value) {
            Ok(encoded) => Ok(encoded),
            Err(_) => Ok(self.fallback.clone()),
        }
    }

    fn decode(&self, value: &Self::Elem) -> Result<Self::Item, CodecError> {
        self.codec.decode(value)
    }
}

/// Encode failures recover through a closure; decode untouched.
///
/// The closure itself may fail; its failure becomes this layer's result.
pub struct CatchOut<C, F> {
    codec: C,
    recover: F,
}

impl<C, F> CatchOut<C, F> {
    pub fn new(codec: C, recover: F) -> Self {
        Self { codec, recover }
    }
}

impl<C, F> Codec for CatchOut<C, F>
where
    C: Codec,
    F: Fn(CodecError) -> Result<C::Elem, CodecError>,
{
    type Item = C::Item;
    type Elem = C::Elem;

    fn encode(&self, value: &Self::Elem) -> Result<Self::Elem, CodecError> {
        self.codec.encode(value).or_else(|err| (self.recover)(err))
    }

    fn decode(&self, value: &Self::Elem) -> Result<Self::Item, CodecError> {
        self.codec.decode(value)
    }
}

/// Builder-style composition, available on every codec.
pub trait CodecExt: Codec + Sized {
    /// Associate a field name with this codec. See [`FieldCodec`].
    fn named(self, name: impl Into<String>) -> FieldCodec<Self> {
        FieldCodec::new(name, self)
    }

    /// Lift this codec over absent elements. See [`NullableCodec`].
    fn nullable(self) -> NullableCodec<Self> {
        NullableCodec::new(self)
    }

    /// Recover decode failures with `fallback`; encode untouched.
    fn default_in(self, fallback: Self::Item) -> DefaultIn<Self>
    where
        Self::Item: Clone,
    {
        DefaultIn::new(self, fallback)
    }

    /// Recover decode failures through `recover`; encode untouched.
    fn catch_in<F>(self, recover: F) -> CatchIn<Self, F>
    where
        F: Fn(CodecError) -> Result<Self::Item, CodecError>,
    {
        CatchIn::new(self, recover)
    }

    /// Recover encode failures with `fallback`; decode untouched.
    fn default_out(self, fallback: Self::Elem) -> DefaultOut<Self> {
        DefaultOut::new(self, fallback)
    }

    /// Recover encode failures through `recover`; decode untouched.
    fn catch_out<F>(self, recover: F) -> CatchOut<Self, F>
    where
        F: Fn(CodecError) -> Result<Self::Elem, CodecError>,
    {
        CatchOut::new(self, recover)
    }
}

impl<C: Codec> CodecExt for C {}

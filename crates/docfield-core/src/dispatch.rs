//! Safe dispatch: runtime shape checks in front of conversion bodies.
//!
//! Leaf codecs are written against one concrete shape ("convert a
//! string"). These helpers let such a body sit safely behind the
//! element-accepting [`Codec`](crate::Codec) contract: the shape is
//! checked first, and a non-matching element becomes the mismatch
//! [`CodecError`] without the body ever running.

use crate::{CodecError, Element};
use std::error::Error as StdError;

/// A typed view that can be extracted from a host element.
///
/// The algebra's stand-in for a runtime `is T` test. `extract` either
/// produces the typed view or nothing, in which case dispatch reports a
/// mismatch naming [`Shape::EXPECTED`] against the element's actual
/// [`type_name`](Element::type_name).
pub trait Shape<E: Element>: Sized {
    /// Shape name reported in mismatch messages.
    const EXPECTED: &'static str;

    /// The typed view of `element`, or `None` when the shape differs.
    fn extract(element: &E) -> Option<Self>;
}

/// Run `body` against the `T`-shaped view of `element`.
///
/// Returns the mismatch [`CodecError`] without invoking `body` when the
/// element does not have shape `T`. Failures produced by `body` are
/// already `CodecError` and propagate as-is.
pub fn try_dispatch<E, T, U, F>(element: &E, body: F) -> Result<U, CodecError>
where
    E: Element,
    T: Shape<E>,
    F: FnOnce(T) -> Result<U, CodecError>,
{
    match T::extract(element) {
        Some(value) => body(value),
        None => Err(CodecError::mismatch(T::EXPECTED, element.type_name())),
    }
}

/// Like [`try_dispatch`], for bodies that fail with a foreign error type.
///
/// A body failure that is already a [`CodecError`] passes through
/// unchanged; anything else arrives as the `source` of a new one.
pub fn try_dispatch_catching<E, T, U, X, F>(element: &E, body: F) -> Result<U, CodecError>
where
    E: Element,
    T: Shape<E>,
    X: StdError + Send + Sync + 'static,
    F: FnOnce(T) -> Result<U, X>,
{
    try_dispatch(element, |value: T| {
        body(value).map_err(|err| CodecError::wrap(Box::new(err)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testval::TestValue;

    #[test]
    fn mismatch_never_invokes_the_body() {
        let mut invoked = false;
        let result: Result<String, _> = try_dispatch(&TestValue::Int(1), |s: String| {
            invoked = true;
            Ok(s)
        });
        let err = result.expect_err("int is not a string");
        assert_eq!(err.message(), "cannot convert int; expected string");
        assert!(!invoked);
    }

    #[test]
    fn matching_shape_reaches_the_body() {
        let result = try_dispatch(&TestValue::Str("ok".into()), |s: String| Ok(s.len()));
        assert_eq!(result.unwrap(), 2);
    }

    #[test]
    fn catching_wraps_foreign_errors_as_cause() {
        let result: Result<i64, _> =
            try_dispatch_catching(&TestValue::Str("abc".into()), |s: String| s.parse::<i64>());
        let err = result.expect_err("parse must fail");
        let cause = err.cause().expect("parse error must be the cause");
        assert!(cause.downcast_ref::<std::num::ParseIntError>().is_some());
    }

    #[test]
    fn catching_passes_codec_errors_through_unwrapped() {
        let result: Result<i64, _> = try_dispatch_catching(&TestValue::Int(1), |_: i64| {
            Err::<i64, _>(CodecError::new("body says no"))
        });
        let err = result.expect_err("body failed");
        assert_eq!(err.message(), "body says no");
        assert!(err.cause().is_none(), "must not be wrapped a second time");
    }
}

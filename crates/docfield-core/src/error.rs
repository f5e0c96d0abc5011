//! The single error type surfaced by the codec algebra.

use std::error::Error as StdError;

/// A failed encode or decode.
///
/// Everything in this crate reports failure through this one type: shape
/// mismatches, failing conversion bodies, and failing recovery closures.
/// Foreign errors raised inside conversion bodies are attached as the
/// `source` so the root cause stays inspectable.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CodecError {
    message: String,
    #[source]
    cause: Option<Box<dyn StdError + Send + Sync>>,
}

impl CodecError {
    /// A conversion failure with the given message and no underlying cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// The shape-mismatch failure reported by safe dispatch.
    pub fn mismatch(expected: &str, actual: &str) -> Self {
        Self::new(format!("cannot convert {actual}; expected {expected}"))
    }

    /// Wrap a foreign error as the cause of a new `CodecError`.
    pub fn caused<E>(cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::wrap(Box::new(cause))
    }

    /// Wrap a boxed error, passing an inner `CodecError` through unchanged
    /// rather than wrapping it a second time.
    pub fn wrap(cause: Box<dyn StdError + Send + Sync>) -> Self {
        match cause.downcast::<CodecError>() {
            Ok(err) => *err,
            Err(other) => Self {
                message: format!("conversion failed: {other}"),
                cause: Some(other),
            },
        }
    }

    /// The human-readable failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped underlying cause, when there is one.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

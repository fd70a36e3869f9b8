//! Error taxonomy shared by every scaling entry point.

use thiserror::Error;

/// Failure modes of the resampling engine.
///
/// Nothing here is retried internally: resampling is deterministic, so a
/// retry would reproduce the same outcome. [`ScaleError::Cancelled`] is a
/// "no result" status rather than a failure — callers that show errors to the
/// user should drop it silently.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleError {
    /// A source or target extent is zero or exceeds [`MAX_DIMENSION`].
    ///
    /// [`MAX_DIMENSION`]: crate::buffer::MAX_DIMENSION
    #[error("invalid image dimensions")]
    InvalidDimensions,

    /// A destination or intermediate buffer could not be allocated.
    /// No partially built buffer is ever returned.
    #[error("pixel buffer allocation failed")]
    AllocationFailure,

    /// Cooperative cancellation was observed mid-operation. Any partially
    /// written destination has been discarded.
    #[error("operation cancelled")]
    Cancelled,

    /// The source buffer is not premultiplied ARGB32.
    #[error("source buffer is not premultiplied ARGB32")]
    PreconditionViolation,
}

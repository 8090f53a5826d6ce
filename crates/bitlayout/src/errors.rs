//! Error types for bit access and structured read/write.

use thiserror::Error;

use crate::offset::Offset;

/// Errors produced by [crate::offset::Offset] arithmetic and the bit accessors in [crate::access].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitError {
    /// Requested bit or byte lies at or past the end of the buffer.
    #[error("out of range")]
    OutOfRange,
    /// Subtraction would produce a position before the start of the buffer.
    #[error("negative offset")]
    Negative,
}

/// Errors produced by [crate::stream::read], [crate::stream::write] and the layout walk.
#[derive(Debug, Error)]
pub enum Error {
    /// A bit accessor failed while transferring a field.
    #[error(transparent)]
    Bit(#[from] BitError),

    /// The source ran dry before the whole layout could be read.
    #[error("short read: expected {expected} bytes, read {actual} bytes")]
    ShortRead { expected: usize, actual: usize },

    /// The field type has no fixed wire representation.
    #[error("unsupported type: {0}")]
    Unsupported(&'static str),

    /// A field could not be assigned; its bits were stepped over and the walk
    /// continued from `resume`.
    #[error("field cannot be assigned, resumed at {resume}")]
    CannotAssign { resume: Offset },

    /// The source or sink reported an I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Typed errors raised across the crate's public boundary.
//!
//! Internal programmer-error conditions — the Myers midpoint search
//! exhausting `d_max` without finding a snake, a path-arena index outside
//! its bounds or the reserved null sentinel, the recursive path builder
//! finishing with anything but exactly one pending result, the walker
//! encountering a path step that is neither diagonal nor axis-aligned, the
//! driver's prefix/suffix trim failing to leave a non-equal remainder, and a
//! token whose `start_byte` exceeds its `end_byte` — are all routed through
//! [`Error::InvariantViolation`] rather than asserted, so a defect in the
//! engine aborts the operation with a typed error instead of panicking the
//! caller's process.

use thiserror::Error;

/// Errors that can occur while computing or inspecting a diff.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    /// A [`crate::changeset::ChangeSet`] was indexed outside `[0, len())`.
    #[error("index {index} out of range for change set of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A collaborator (tokenizer or syntax-tree extractor) returned a token
    /// whose byte range falls outside the buffer it was supposed to index.
    #[error(
        "token range {start_byte}..{end_byte} exceeds input of length {buffer_len}"
    )]
    TextRangeExceedsInput {
        start_byte: u32,
        end_byte: u32,
        buffer_len: usize,
    },

    /// An internal invariant was violated: a defect in the engine itself
    /// rather than a caller mistake. Never produced by well-formed input.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type alias used throughout the crate's public API.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        let err = Error::IndexOutOfRange { index: 5, len: 3 };
        assert_eq!(err.to_string(), "index 5 out of range for change set of length 3");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}

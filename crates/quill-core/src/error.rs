//! # Error Types
//!
//! The publish-action state machine itself is total and never fails. The
//! only fallible surface in the stack is turning external text (status
//! names from a picker or a session file, RFC 3339 dates) into typed
//! values. Those failures are reported through [`QuillError`].

use thiserror::Error;

/// Top-level error type for the Quill editor core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuillError {
    /// A post status name did not match any known lifecycle status.
    #[error("unknown post status: {0:?}")]
    UnknownStatus(String),

    /// A publish action name did not match any known action.
    #[error("unknown publish action: {0:?}")]
    UnknownAction(String),

    /// A timestamp could not be parsed or is out of range.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

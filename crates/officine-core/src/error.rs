//! # Error Types
//!
//! Domain-specific error types for officine-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  officine-core errors (this file)                                      │
//! │  └── CoreError      - Screen state machine violations                  │
//! │                                                                         │
//! │  officine-gateway errors (separate crate)                              │
//! │  └── GatewayError   - Transport / query / write failures               │
//! │                                                                         │
//! │  Flow: CoreError | GatewayError → controller state → UI banner/toast   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (line id, phase, etc.)
//! 3. Errors are enum variants, never String
//! 4. No error here is fatal: every variant degrades to a visible,
//!    dismissible or retryable UI state

use thiserror::Error;

use crate::edit::Phase;
use crate::types::RecordId;

/// Screen state machine errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A sale line item was addressed by a product id that is not in
    /// the current draft.
    #[error("line item for product {0} not found")]
    LineNotFound(RecordId),

    /// An operation that requires an open edit session was attempted
    /// while the session was in another phase.
    ///
    /// ## When This Occurs
    /// - Submitting after the modal already started closing
    /// - Mutating the working copy of a closed session
    #[error("edit session is {0:?}, operation requires Open")]
    SessionNotOpen(Phase),

    /// `open` was called on a session that is not fully closed.
    ///
    /// The screen owns session construction and destruction; a second
    /// "new"/"edit" action must wait until the close animation finished.
    #[error("edit session is {0:?}, cannot open another record")]
    SessionBusy(Phase),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LineNotFound(42);
        assert_eq!(err.to_string(), "line item for product 42 not found");

        let err = CoreError::SessionNotOpen(Phase::Closing);
        assert_eq!(
            err.to_string(),
            "edit session is Closing, operation requires Open"
        );
    }
}

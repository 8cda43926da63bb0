//! # Gateway Errors
//!
//! ## Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Gateway Error Taxonomy                            │
//! │                                                                         │
//! │  Unauthenticated  - no/invalid token     → shell redirects to login    │
//! │  Transport        - reqwest-level        → list keeps prior items      │
//! │  Query            - non-empty `errors`   → list keeps prior items      │
//! │  NotFound         - by-id query empty    → modal shows inline error    │
//! │  Write            - non-2xx on REST      → modal stays open, retry     │
//! │  Login            - credential rejection → inline error on login form  │
//! │                                                                         │
//! │  None of these is fatal: every variant degrades to a visible,          │
//! │  dismissible or retryable UI state.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use officine_core::RecordId;

/// Errors from the Remote Data Gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No token stored, or the backend rejected the one we sent.
    /// Surfaced by redirecting to the login surface, not by a banner.
    #[error("not authenticated")]
    Unauthenticated,

    /// The HTTP call itself failed (connect, timeout, decode).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The read path answered with a non-empty `errors` collection.
    /// This is a failure even when the HTTP status was a 200.
    #[error("query failed: {message}")]
    Query { message: String },

    /// A by-id query returned an empty collection.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: RecordId },

    /// The write path answered with anything but 200/201.
    #[error("write rejected ({status}): {message}")]
    Write { status: u16, message: String },

    /// The login endpoint rejected the credentials or returned a
    /// response without a token.
    #[error("login failed: {message}")]
    Login { message: String },
}

impl GatewayError {
    /// Whether the caller should route to the login surface instead of
    /// rendering an in-place error.
    pub fn is_auth(&self) -> bool {
        matches!(self, GatewayError::Unauthenticated)
    }
}

/// Convenience type alias for Results with GatewayError.
pub type GatewayResult<T> = Result<T, GatewayError>;

//! Error types for the controller layer.

use officine_core::CoreError;
use officine_gateway::GatewayError;
use thiserror::Error;

/// Anything a controller operation can fail with.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// A state machine rejected the transition.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The gateway call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A sale draft with no lines was submitted.
    #[error("draft has no lines")]
    EmptyDraft,
}

impl ConsoleError {
    /// Whether this failure means the session token is gone and the
    /// shell must fall back to the sign-in gate.
    pub fn is_auth(&self) -> bool {
        matches!(self, ConsoleError::Gateway(e) if e.is_auth())
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_classification() {
        let err = ConsoleError::from(GatewayError::Unauthenticated);
        assert!(err.is_auth());

        let err = ConsoleError::from(CoreError::SessionNotOpen(officine_core::Phase::Closed));
        assert!(!err.is_auth());
    }
}

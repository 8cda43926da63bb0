//! # Session Store
//!
//! Holds the bearer credential for the signed-in user.
//!
//! ## Token Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session Token Lifecycle                            │
//! │                                                                         │
//! │  login(email, password) ──► POST /api/login ──► token stored here      │
//! │                                                                         │
//! │  every gateway call ──────► auth header fragment attached when a       │
//! │                             token is present                            │
//! │                                                                         │
//! │  logout / 401 ────────────► clear_token() ──► shell shows login        │
//! │                                                                         │
//! │  Token presence gates whether the shell attempts session restoration   │
//! │  at startup (see officine-console::shell).                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The token is opaque to this client: no decoding, no local expiry
//! tracking. The backend is the only judge of validity.

use std::sync::Arc;

use tokio::sync::RwLock;

/// In-memory bearer credential store.
///
/// Cheap to clone; all clones share the same token slot.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    token: Arc<RwLock<Option<String>>>,
}

impl SessionStore {
    /// Creates an empty (signed-out) store.
    pub fn new() -> Self {
        SessionStore::default()
    }

    /// Creates a store pre-seeded with a token, for restored sessions.
    pub fn with_token(token: impl Into<String>) -> Self {
        SessionStore {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn save_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    pub async fn is_signed_in(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// The `Authorization` header value to attach to outgoing
    /// requests, when a token is held.
    pub async fn bearer(&self) -> Option<String> {
        self.token
            .read()
            .await
            .as_ref()
            .map(|token| format!("Bearer {}", token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_token_round_trip() {
        let store = SessionStore::new();
        assert!(!store.is_signed_in().await);
        assert_eq!(store.bearer().await, None);

        store.save_token("abc123").await;
        assert!(store.is_signed_in().await);
        assert_eq!(store.bearer().await, Some("Bearer abc123".to_string()));

        store.clear_token().await;
        assert!(!store.is_signed_in().await);
    }

    #[tokio::test]
    async fn test_clones_share_the_slot() {
        let store = SessionStore::new();
        let clone = store.clone();
        store.save_token("tok").await;
        assert_eq!(clone.token().await, Some("tok".to_string()));
    }
}

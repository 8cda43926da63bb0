//! # Debounced Product Search
//!
//! Keystroke-level input for the sale composer's product lookup. Every
//! keystroke bumps a seq and arms a quiet-period timer; only the timer
//! that still owns the latest seq when it fires issues the query, and
//! only a result that still owns the latest seq lands. A blank input
//! clears the hits without querying.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

use officine_core::ProduitHit;
use officine_gateway::{GatewayResult, RemoteGateway};

/// Quiet period after the last keystroke before the query goes out.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// What the search box needs from the backend.
#[async_trait]
pub trait SearchBackend: Send + Sync + 'static {
    async fn recherche_produits(&self, term: &str) -> GatewayResult<Vec<ProduitHit>>;
}

#[async_trait]
impl SearchBackend for RemoteGateway {
    async fn recherche_produits(&self, term: &str) -> GatewayResult<Vec<ProduitHit>> {
        RemoteGateway::recherche_produits(self, term).await
    }
}

#[derive(Default)]
struct SearchState {
    seq: u64,
    query: String,
    hits: Vec<ProduitHit>,
    searching: bool,
}

/// The debounced search box.
pub struct SearchBox<B: SearchBackend> {
    backend: Arc<B>,
    state: Arc<Mutex<SearchState>>,
}

impl<B: SearchBackend> Clone for SearchBox<B> {
    fn clone(&self) -> Self {
        SearchBox {
            backend: self.backend.clone(),
            state: self.state.clone(),
        }
    }
}

impl<B: SearchBackend> SearchBox<B> {
    pub fn new(backend: Arc<B>) -> Self {
        SearchBox {
            backend,
            state: Arc::new(Mutex::new(SearchState::default())),
        }
    }

    /// Feeds one keystroke's worth of input.
    pub async fn input(&self, text: &str) {
        let text = text.to_string();

        let seq = {
            let mut state = self.state.lock().await;
            state.seq += 1;
            state.query = text.clone();
            if text.trim().is_empty() {
                // Blank input clears without querying.
                state.hits.clear();
                state.searching = false;
                return;
            }
            state.searching = true;
            state.seq
        };

        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE_DELAY).await;

            // Another keystroke landed during the quiet period.
            if this.state.lock().await.seq != seq {
                return;
            }

            debug!(term = %text, "Searching products");
            let result = this.backend.recherche_produits(&text).await;

            let mut state = this.state.lock().await;
            if state.seq != seq {
                debug!(term = %text, "Discarded stale search result");
                return;
            }
            state.searching = false;
            match result {
                Ok(hits) => state.hits = hits,
                // A failed lookup just leaves the previous hits up.
                Err(e) => debug!(error = %e, "Search failed"),
            }
        });
    }

    /// Clears the box, as when a hit was picked.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.seq += 1;
        state.query.clear();
        state.hits.clear();
        state.searching = false;
    }

    pub async fn query(&self) -> String {
        self.state.lock().await.query.clone()
    }

    pub async fn hits(&self) -> Vec<ProduitHit> {
        self.state.lock().await.hits.clone()
    }

    pub async fn is_searching(&self) -> bool {
        self.state.lock().await.searching
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

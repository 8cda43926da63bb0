//! # Sale Composer
//!
//! Controller for the new-sale modal: an [`EditSession`] around a
//! [`SaleDraft`]. Lines come in from the search box as product hits;
//! prices are frozen at add time and quantities are clamped against
//! the pharmacy stock inside the draft itself.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use officine_core::{
    EditSession, Phase, ProduitHit, RecordId, SaleDraft, UserInfo, CLOSE_DELAY, OPEN_DELAY,
};
use officine_gateway::{GatewayResult, RemoteGateway};

use crate::error::ConsoleResult;
use crate::refresh::RefreshCoordinator;

/// What the sale modal needs from the backend.
#[async_trait]
pub trait SaleBackend: Send + Sync + 'static {
    async fn me(&self) -> GatewayResult<UserInfo>;
    async fn create_vente(&self, payload: &Value) -> GatewayResult<()>;
}

#[async_trait]
impl SaleBackend for RemoteGateway {
    async fn me(&self) -> GatewayResult<UserInfo> {
        RemoteGateway::me(self).await
    }

    async fn create_vente(&self, payload: &Value) -> GatewayResult<()> {
        RemoteGateway::create_vente(self, payload).await
    }
}

/// Generates a fresh 13-digit invoice number.
///
/// Millisecond timestamps are 13 digits for the foreseeable future,
/// which matches the numbering the backend already stores.
pub(crate) fn generate_numero() -> String {
    format!("{:013}", Utc::now().timestamp_millis())
}

/// Controller for the new-sale modal.
pub struct SaleComposer<B: SaleBackend> {
    backend: Arc<B>,
    coordinator: RefreshCoordinator,
    session: Mutex<EditSession<SaleDraft>>,
    vendeur: Mutex<Option<UserInfo>>,
}

impl<B: SaleBackend> SaleComposer<B> {
    pub fn new(backend: Arc<B>, coordinator: RefreshCoordinator) -> Self {
        SaleComposer {
            backend,
            coordinator,
            session: Mutex::new(EditSession::new()),
            vendeur: Mutex::new(None),
        }
    }

    /// Opens the modal with an empty draft and a fresh invoice number.
    pub async fn open(&self) -> ConsoleResult<()> {
        let numero = generate_numero();
        debug!(numero = %numero, "Sale modal opening");
        self.session.lock().await.open(None, SaleDraft::new(numero))?;

        // The seller name is display-only; a failed fetch leaves it
        // blank rather than blocking the modal.
        match self.backend.me().await {
            Ok(user) => *self.vendeur.lock().await = Some(user),
            Err(e) => warn!(error = %e, "Seller fetch failed"),
        }

        tokio::time::sleep(OPEN_DELAY).await;
        self.session.lock().await.mark_open();
        Ok(())
    }

    /// Adds a searched product as a line; `false` when it is already
    /// in the draft.
    pub async fn add_line(&self, hit: &ProduitHit) -> bool {
        let mut session = self.session.lock().await;
        match session.form_mut() {
            Some(draft) => draft.add_line(hit),
            None => false,
        }
    }

    /// Sets a line's quantity, returning the clamped value actually
    /// stored.
    pub async fn set_quantity(&self, produit_id: RecordId, quantity: i64) -> ConsoleResult<i64> {
        let mut session = self.session.lock().await;
        let draft = session
            .form_mut()
            .ok_or(officine_core::CoreError::SessionNotOpen(Phase::Closed))?;
        Ok(draft.set_quantity(produit_id, quantity)?)
    }

    pub async fn remove_line(&self, produit_id: RecordId) -> ConsoleResult<()> {
        let mut session = self.session.lock().await;
        let draft = session
            .form_mut()
            .ok_or(officine_core::CoreError::SessionNotOpen(Phase::Closed))?;
        Ok(draft.remove_line(produit_id)?)
    }

    pub async fn set_client(&self, name: &str) {
        let mut session = self.session.lock().await;
        if let Some(draft) = session.form_mut() {
            draft.client = name.to_string();
        }
    }

    /// Submits the draft; an empty draft is rejected before any
    /// request goes out.
    pub async fn submit(&self) -> ConsoleResult<()> {
        {
            let session = self.session.lock().await;
            if session.form().map(SaleDraft::is_empty).unwrap_or(true) {
                self.coordinator
                    .failed("Aucun produit dans la vente")
                    .await;
                return Err(crate::error::ConsoleError::EmptyDraft);
            }
        }

        let payload = self.session.lock().await.submit_payload()?;

        if let Err(e) = self.backend.create_vente(&payload).await {
            self.coordinator.failed(e.to_string()).await;
            return Err(e.into());
        }

        self.session.lock().await.commit()?;
        self.coordinator
            .completed("Vente enregistrée avec succès")
            .await;

        tokio::time::sleep(CLOSE_DELAY).await;
        self.session.lock().await.mark_closed();
        Ok(())
    }

    /// Closes the modal, discarding the draft.
    pub async fn cancel(&self) {
        self.session.lock().await.cancel();
        tokio::time::sleep(CLOSE_DELAY).await;
        self.session.lock().await.mark_closed();
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub async fn phase(&self) -> Phase {
        self.session.lock().await.phase()
    }

    pub async fn draft(&self) -> Option<SaleDraft> {
        self.session.lock().await.form().cloned()
    }

    pub async fn vendeur(&self) -> Option<UserInfo> {
        self.vendeur.lock().await.clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Product Editor
//!
//! Controller for the create/edit product modal.
//!
//! ## Open Sequencing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Edit-Existing Open Sequence                          │
//! │                                                                         │
//! │  open_edit(id) ──► session: Closed → Opening                            │
//! │        │                                                                │
//! │        ├─► detail fetch + familles fetch      (runs while Opening:      │
//! │        │       hydrates the working copy       the enter delay NEVER    │
//! │        │                                       gates the fetches)       │
//! │        └─► sleep(OPEN_DELAY) ──► session: Opening → Open                │
//! │                                                                         │
//! │  submit() ── save OK ──► commit ──► coordinator.completed(msg)          │
//! │                  │                  sleep(CLOSE_DELAY) ──► Closed       │
//! │                  └─ save Err ─────► session stays Open, copy intact,    │
//! │                                     coordinator.failed(msg)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use officine_core::{
    EditSession, Famille, Phase, ProduitDetail, ProductForm, RecordId, CLOSE_DELAY, OPEN_DELAY,
};
use officine_gateway::{GatewayResult, RemoteGateway};

use crate::error::ConsoleResult;
use crate::refresh::RefreshCoordinator;

/// What the product modal needs from the backend.
#[async_trait]
pub trait ProductBackend: Send + Sync + 'static {
    async fn produit_detail(&self, id: RecordId) -> GatewayResult<ProduitDetail>;
    async fn familles(&self) -> GatewayResult<Vec<Famille>>;
    async fn save_produit(&self, payload: &Value) -> GatewayResult<()>;
}

#[async_trait]
impl ProductBackend for RemoteGateway {
    async fn produit_detail(&self, id: RecordId) -> GatewayResult<ProduitDetail> {
        RemoteGateway::produit_detail(self, id).await
    }

    async fn familles(&self) -> GatewayResult<Vec<Famille>> {
        RemoteGateway::familles(self).await
    }

    async fn save_produit(&self, payload: &Value) -> GatewayResult<()> {
        RemoteGateway::save_produit(self, payload).await
    }
}

/// Controller for the product modal.
pub struct ProductEditor<B: ProductBackend> {
    backend: Arc<B>,
    coordinator: RefreshCoordinator,
    session: Mutex<EditSession<ProductForm>>,
    familles: Mutex<Vec<Famille>>,
}

impl<B: ProductBackend> ProductEditor<B> {
    pub fn new(backend: Arc<B>, coordinator: RefreshCoordinator) -> Self {
        ProductEditor {
            backend,
            coordinator,
            session: Mutex::new(EditSession::new()),
            familles: Mutex::new(Vec::new()),
        }
    }

    /// Opens the modal with an empty form for a new product.
    pub async fn open_create(&self) -> ConsoleResult<()> {
        self.session
            .lock()
            .await
            .open(None, ProductForm::default())?;
        debug!("Product modal opening (create)");

        self.load_familles().await;

        tokio::time::sleep(OPEN_DELAY).await;
        self.session.lock().await.mark_open();
        Ok(())
    }

    /// Opens the modal for an existing product.
    ///
    /// The detail fetch runs while the modal is still Opening; if it
    /// fails the modal backs out and the error is surfaced to the
    /// caller.
    pub async fn open_edit(&self, id: RecordId) -> ConsoleResult<()> {
        self.session
            .lock()
            .await
            .open(Some(id), ProductForm::default())?;
        debug!(id = %id, "Product modal opening (edit)");

        match self.backend.produit_detail(id).await {
            Ok(detail) => {
                let mut session = self.session.lock().await;
                if let Some(form) = session.form_mut() {
                    *form = ProductForm::from(&detail);
                }
            }
            Err(e) => {
                self.back_out().await;
                return Err(e.into());
            }
        }

        self.load_familles().await;

        tokio::time::sleep(OPEN_DELAY).await;
        self.session.lock().await.mark_open();
        Ok(())
    }

    /// Families for the selector; a failed fetch leaves the selector
    /// empty rather than blocking the modal.
    async fn load_familles(&self) {
        match self.backend.familles().await {
            Ok(familles) => *self.familles.lock().await = familles,
            Err(e) => warn!(error = %e, "Familles fetch failed"),
        }
    }

    /// Applies one keystroke-level field change to the working copy.
    pub async fn set_field(&self, name: &str, value: &str) {
        let mut session = self.session.lock().await;
        if let Some(form) = session.form_mut() {
            form.set_field(name, value);
        }
    }

    /// Submits the working copy.
    ///
    /// On success the modal closes and the coordinator refreshes the
    /// catalog; on failure the session stays Open with the copy intact
    /// so the user can correct and retry.
    pub async fn submit(&self) -> ConsoleResult<()> {
        let payload = self.session.lock().await.submit_payload()?;

        if let Err(e) = self.backend.save_produit(&payload).await {
            self.coordinator.failed(e.to_string()).await;
            return Err(e.into());
        }

        let outcome = self.session.lock().await.commit()?;
        let message = if outcome.was_create {
            "Produit créé avec succès"
        } else {
            "Produit mis à jour avec succès"
        };
        self.coordinator.completed(message).await;

        tokio::time::sleep(CLOSE_DELAY).await;
        self.session.lock().await.mark_closed();
        Ok(())
    }

    /// Closes the modal without writing anything.
    pub async fn cancel(&self) {
        self.back_out().await;
    }

    async fn back_out(&self) {
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

    pub async fn form(&self) -> Option<ProductForm> {
        self.session.lock().await.form().cloned()
    }

    pub async fn familles(&self) -> Vec<Famille> {
        self.familles.lock().await.clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    use officine_gateway::GatewayError;

    use crate::notify::{NoticeKind, Notifier};
    use crate::refresh::Refreshable;

    #[derive(Default)]
    struct StubBackend {
        reject_save: AtomicBool,
        saved: Mutex<Vec<Value>>,
    }

    #[async_trait]
    impl ProductBackend for StubBackend {
        async fn produit_detail(&self, id: RecordId) -> GatewayResult<ProduitDetail> {
            if id == 404 {
                return Err(GatewayError::NotFound {
                    entity: "produit",
                    id,
                });
            }
            Ok(ProduitDetail {
                id,
                designation: Some("Doliprane 500".to_string()),
                pa: Some(250.0),
                pv: Some(400.0),
                ..Default::default()
            })
        }

        async fn familles(&self) -> GatewayResult<Vec<Famille>> {
            Ok(vec![Famille {
                id: Some(1),
                nom: "Antalgiques".to_string(),
            }])
        }

        async fn save_produit(&self, payload: &Value) -> GatewayResult<()> {
            if self.reject_save.load(Ordering::SeqCst) {
                return Err(GatewayError::Write {
                    status: 422,
                    message: "designation manquante".to_string(),
                });
            }
            self.saved.lock().await.push(payload.clone());
            Ok(())
        }
    }

    struct NoList;

    #[async_trait]
    impl Refreshable for NoList {
        async fn refresh(&self) {}
    }

    fn editor(backend: Arc<StubBackend>) -> (ProductEditor<StubBackend>, Notifier) {
        let notifier = Notifier::new();
        let coordinator = RefreshCoordinator::new(Arc::new(NoList), notifier.clone());
        (ProductEditor::new(backend, coordinator), notifier)
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_flow_end_to_end() {
        let backend = Arc::new(StubBackend::default());
        let (editor, notifier) = editor(backend.clone());

        editor.open_create().await.unwrap();
        assert_eq!(editor.phase().await, Phase::Open);
        assert_eq!(editor.familles().await.len(), 1);

        editor.set_field("designation", "Ibuprofène 200").await;
        editor.set_field("pv", "350.50").await;
        editor.submit().await.unwrap();

        assert_eq!(editor.phase().await, Phase::Closed);
        let saved = backend.saved.lock().await;
        assert_eq!(saved[0]["designation"], json!("Ibuprofène 200"));
        assert!(saved[0].get("id").is_none());
        assert_eq!(
            notifier.current().await.unwrap().message,
            "Produit créé avec succès"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_hydrates_from_detail_and_carries_id() {
        let backend = Arc::new(StubBackend::default());
        let (editor, notifier) = editor(backend.clone());

        editor.open_edit(42).await.unwrap();
        let form = editor.form().await.unwrap();
        assert_eq!(form.designation, "Doliprane 500");
        assert_eq!(form.pv, 400.0);

        editor.submit().await.unwrap();
        let saved = backend.saved.lock().await;
        assert_eq!(saved[0]["id"], json!("42"));
        assert_eq!(
            notifier.current().await.unwrap().message,
            "Produit mis à jour avec succès"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_detail_fetch_backs_out() {
        let backend = Arc::new(StubBackend::default());
        let (editor, _) = editor(backend);

        assert!(editor.open_edit(404).await.is_err());
        assert_eq!(editor.phase().await, Phase::Closed);
        // The slot is free again for the next open.
        assert!(editor.open_create().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_save_keeps_the_modal_open() {
        let backend = Arc::new(StubBackend::default());
        let (editor, notifier) = editor(backend.clone());

        editor.open_create().await.unwrap();
        editor.set_field("designation", "Aspirine").await;

        backend.reject_save.store(true, Ordering::SeqCst);
        assert!(editor.submit().await.is_err());

        // Still open, copy intact, error notice up.
        assert_eq!(editor.phase().await, Phase::Open);
        assert_eq!(editor.form().await.unwrap().designation, "Aspirine");
        assert_eq!(notifier.current().await.unwrap().kind, NoticeKind::Error);

        // Retry after the backend recovers.
        backend.reject_save.store(false, Ordering::SeqCst);
        editor.submit().await.unwrap();
        assert_eq!(editor.phase().await, Phase::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_the_copy() {
        let backend = Arc::new(StubBackend::default());
        let (editor, _) = editor(backend.clone());

        editor.open_create().await.unwrap();
        editor.set_field("designation", "brouillon").await;
        editor.cancel().await;

        assert_eq!(editor.phase().await, Phase::Closed);
        assert!(editor.form().await.is_none());
        assert!(backend.saved.lock().await.is_empty());
    }
}

//! # Refresh Coordinator
//!
//! The one object allowed to react to a successful write. After an
//! editor commits, the coordinator re-fetches the backing list FIRST
//! and only then posts the success notice, so the user never reads
//! "créé avec succès" over a table that does not contain the record
//! yet. Exactly one refresh and one notice per successful write; a
//! failed write reaches the notifier only.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::list::ListController;
use crate::notify::Notifier;
use crate::source::RecordSource;

/// Anything the coordinator can re-fetch after a write.
#[async_trait]
pub trait Refreshable: Send + Sync {
    async fn refresh(&self);
}

#[async_trait]
impl<S: RecordSource> Refreshable for ListController<S> {
    async fn refresh(&self) {
        // A failed refresh already left its message in the list state;
        // the write itself still succeeded.
        if let Err(e) = ListController::refresh(self).await {
            warn!(error = %e, "Post-write refresh failed");
        }
    }
}

/// Ties one list to the notification slot.
#[derive(Clone)]
pub struct RefreshCoordinator {
    list: Arc<dyn Refreshable>,
    notifier: Notifier,
}

impl RefreshCoordinator {
    pub fn new(list: Arc<dyn Refreshable>, notifier: Notifier) -> Self {
        RefreshCoordinator { list, notifier }
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// A write succeeded: refresh, then announce.
    pub async fn completed(&self, message: impl Into<String>) {
        let message = message.into();
        debug!(message = %message, "Write completed");
        self.list.refresh().await;
        self.notifier.success(message).await;
    }

    /// A write failed: announce only, the list is untouched.
    pub async fn failed(&self, message: impl Into<String>) {
        self.notifier.error(message).await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    /// Records the interleaving of refreshes and notice reads.
    struct CountingList {
        refreshes: AtomicUsize,
        notice_at_refresh: Mutex<Vec<Option<String>>>,
        notifier: Notifier,
    }

    #[async_trait]
    impl Refreshable for CountingList {
        async fn refresh(&self) {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            let up = self.notifier.current().await.map(|n| n.message);
            self.notice_at_refresh.lock().await.push(up);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_exactly_one_refresh_then_one_notice() {
        let notifier = Notifier::new();
        let list = Arc::new(CountingList {
            refreshes: AtomicUsize::new(0),
            notice_at_refresh: Mutex::new(Vec::new()),
            notifier: notifier.clone(),
        });
        let coordinator = RefreshCoordinator::new(list.clone(), notifier.clone());

        coordinator.completed("Produit créé avec succès").await;

        assert_eq!(list.refreshes.load(Ordering::SeqCst), 1);
        // The refresh ran before the notice went up.
        assert_eq!(*list.notice_at_refresh.lock().await, vec![None]);
        assert_eq!(
            notifier.current().await.unwrap().message,
            "Produit créé avec succès"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_write_never_refreshes() {
        let notifier = Notifier::new();
        let list = Arc::new(CountingList {
            refreshes: AtomicUsize::new(0),
            notice_at_refresh: Mutex::new(Vec::new()),
            notifier: notifier.clone(),
        });
        let coordinator = RefreshCoordinator::new(list.clone(), notifier.clone());

        coordinator.failed("write rejected (422): stock insuffisant").await;

        assert_eq!(list.refreshes.load(Ordering::SeqCst), 0);
        assert_eq!(
            notifier.current().await.unwrap().kind,
            crate::notify::NoticeKind::Error
        );
    }
}

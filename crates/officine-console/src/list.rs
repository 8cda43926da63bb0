//! # List Controller
//!
//! Drives one [`ListState`] against one [`RecordSource`]: every
//! accepted transition yields a `FetchSpec`, the controller performs
//! exactly that fetch, and the result is applied back under the
//! `FetchSpec`'s seq so a superseded fetch can never overwrite a newer
//! one.
//!
//! Nothing is cancelled on the wire. A stale response completes
//! normally and is dropped at apply time.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use officine_core::{FetchSpec, ListState, PageItem};

use crate::error::ConsoleResult;
use crate::source::RecordSource;

/// Controller for one paginated screen.
///
/// Clones share the same state; screens hand clones to spawned tasks.
pub struct ListController<S: RecordSource> {
    source: Arc<S>,
    state: Arc<Mutex<ListState<S::Record>>>,
}

impl<S: RecordSource> Clone for ListController<S> {
    fn clone(&self) -> Self {
        ListController {
            source: self.source.clone(),
            state: self.state.clone(),
        }
    }
}

impl<S: RecordSource> ListController<S> {
    /// Creates the controller for a freshly mounted screen.
    pub fn new(source: Arc<S>, page_size: u32) -> Self {
        ListController {
            source,
            state: Arc::new(Mutex::new(ListState::new(page_size))),
        }
    }

    /// The mount-time fetch: page 1 at the configured size.
    pub async fn mount(&self) -> ConsoleResult<()> {
        let spec = self.state.lock().await.initial_fetch();
        self.run_fetch(spec).await
    }

    /// Navigates to page `n`; out-of-range and same-page requests are
    /// silent no-ops.
    pub async fn set_page(&self, n: u32) -> ConsoleResult<()> {
        let spec = self.state.lock().await.set_page(n);
        match spec {
            Some(spec) => self.run_fetch(spec).await,
            None => Ok(()),
        }
    }

    /// Changes the window size, which always lands back on page 1.
    pub async fn set_page_size(&self, n: u32) -> ConsoleResult<()> {
        let spec = self.state.lock().await.set_page_size(n);
        match spec {
            Some(spec) => self.run_fetch(spec).await,
            None => Ok(()),
        }
    }

    /// Re-fetches the current page with the current size.
    pub async fn refresh(&self) -> ConsoleResult<()> {
        let spec = self.state.lock().await.refresh();
        self.run_fetch(spec).await
    }

    /// Runs one fetch and applies its result under the issuing seq.
    async fn run_fetch(&self, spec: FetchSpec) -> ConsoleResult<()> {
        debug!(seq = spec.seq, page = spec.page, per_page = spec.per_page, "List fetch");

        match self.source.fetch_page(spec.page, spec.per_page).await {
            Ok(page) => {
                let mut state = self.state.lock().await;
                if !state.apply_success(spec.seq, page) {
                    debug!(seq = spec.seq, "Discarded stale list result");
                }
                Ok(())
            }
            Err(e) => {
                let mut state = self.state.lock().await;
                if !state.apply_failure(spec.seq, e.to_string()) {
                    debug!(seq = spec.seq, "Discarded stale list failure");
                }
                Err(e.into())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Runs `f` against the current state under the lock.
    pub async fn with_state<R>(&self, f: impl FnOnce(&ListState<S::Record>) -> R) -> R {
        let state = self.state.lock().await;
        f(&state)
    }

    /// The page-number control for the current state.
    pub async fn pager(&self) -> Vec<PageItem> {
        self.state.lock().await.pager()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;

    use officine_core::ListPage;
    use officine_gateway::{GatewayError, GatewayResult};

    /// Serves `total` numbered records; each per_page value resolves
    /// after its own delay so tests can overlap two fetches.
    struct SlowSource {
        total: u64,
        delay_ms: fn(u32) -> u64,
    }

    #[async_trait]
    impl RecordSource for SlowSource {
        type Record = u64;

        async fn fetch_page(&self, page: u32, per_page: u32) -> GatewayResult<ListPage<u64>> {
            tokio::time::sleep(Duration::from_millis((self.delay_ms)(per_page))).await;
            let start = u64::from(page - 1) * u64::from(per_page);
            let end = (start + u64::from(per_page)).min(self.total);
            Ok(ListPage {
                items: (start..end).collect(),
                current_page: page,
                per_page,
                total: self.total,
            })
        }
    }

    struct FailingSource;

    #[async_trait]
    impl RecordSource for FailingSource {
        type Record = u64;

        async fn fetch_page(&self, _page: u32, _per_page: u32) -> GatewayResult<ListPage<u64>> {
            Err(GatewayError::Query {
                message: "backend down".to_string(),
            })
        }
    }

    fn slow(total: u64) -> Arc<SlowSource> {
        Arc::new(SlowSource {
            total,
            delay_ms: |_| 1,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_then_navigate() {
        let controller = ListController::new(slow(23), 5);
        controller.mount().await.unwrap();

        controller
            .with_state(|s| {
                assert_eq!(s.page(), 1);
                assert_eq!(s.data().unwrap().items, vec![0, 1, 2, 3, 4]);
                assert_eq!(s.known_total_pages(), Some(5));
            })
            .await;

        controller.set_page(5).await.unwrap();
        controller
            .with_state(|s| {
                assert_eq!(s.data().unwrap().items, vec![20, 21, 22]);
                assert!(!s.is_loading());
            })
            .await;

        // Page 6 does not exist; state is untouched.
        controller.set_page(6).await.unwrap();
        controller.with_state(|s| assert_eq!(s.page(), 5)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_size_change_resets_to_page_one() {
        let controller = ListController::new(slow(23), 5);
        controller.mount().await.unwrap();
        controller.set_page(3).await.unwrap();

        controller.set_page_size(10).await.unwrap();
        controller
            .with_state(|s| {
                assert_eq!(s.page(), 1);
                assert_eq!(s.page_size(), 10);
                assert_eq!(s.data().unwrap().items.len(), 10);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_fetches_keep_the_newer_result() {
        // The old window (5) resolves slowly, the new window (10)
        // quickly, so the stale result arrives LAST.
        let source = Arc::new(SlowSource {
            total: 23,
            delay_ms: |per_page| if per_page == 5 { 100 } else { 10 },
        });
        let controller = ListController::new(source, 5);

        let slow_mount = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.mount().await })
        };
        // Let the slow fetch issue its spec before superseding it.
        tokio::task::yield_now().await;

        controller.set_page_size(10).await.unwrap();
        slow_mount.await.unwrap().unwrap();

        controller
            .with_state(|s| {
                // The straggler did not overwrite the newer window.
                assert_eq!(s.data().unwrap().per_page, 10);
                assert_eq!(s.page_size(), 10);
                assert!(!s.is_loading());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_prior_page_visible() {
        let controller = ListController::new(slow(23), 5);
        controller.mount().await.unwrap();

        let failing: ListController<FailingSource> = ListController::new(Arc::new(FailingSource), 5);
        assert!(failing.mount().await.is_err());
        failing
            .with_state(|s| {
                assert!(s.data().is_none());
                assert_eq!(s.last_error(), Some("query failed: backend down"));
                assert!(!s.is_loading());
            })
            .await;
    }
}

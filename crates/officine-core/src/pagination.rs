//! # Paginated List State
//!
//! The fetch-on-parameter-change contract shared by the Products and
//! Ventes screens, as a pure state machine.
//!
//! ## Fetch Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ListState Fetch Lifecycle                            │
//! │                                                                         │
//! │  Caller                      ListState                 Remote gateway   │
//! │  ──────                      ─────────                 ──────────────   │
//! │                                                                         │
//! │  set_page(3) ───────────────► seq=7, loading=true                      │
//! │               ◄── FetchSpec{seq:7, page:3, per_page:5}                 │
//! │                                        │ caller performs the fetch     │
//! │                                        └──────────────────────────────► │
//! │                                                                         │
//! │  set_page_size(10) ─────────► seq=8, page=1, loading=true              │
//! │               ◄── FetchSpec{seq:8, page:1, per_page:10}                │
//! │                                        └──────────────────────────────► │
//! │                                                                         │
//! │  apply_success(seq:7, …) ───► DISCARDED (7 < 8, stale pair)            │
//! │  apply_success(seq:8, …) ───► committed, loading=false                 │
//! │                                                                         │
//! │  NOTE: nothing is cancelled on the wire. "Cancellation" is result      │
//! │        discarding based on request identity, never transport abort.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `page` stays within `[1, total_pages]` of the last committed page;
//!   out-of-range navigation is rejected as a no-op, never clamped
//! - changing `page_size` always resets `page` to 1
//! - a failed fetch keeps the previous items visible (stale-but-present
//!   beats a blanked table) and records the error

use serde::Serialize;

use crate::types::ListPage;

// =============================================================================
// Derived Page Count
// =============================================================================

/// `ceil(total / per_page)`, floored at 1 so an empty collection still
/// renders a single (empty) page.
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 1;
    }
    let pages = (total + u64::from(per_page) - 1) / u64::from(per_page);
    (pages.max(1)).min(u64::from(u32::MAX)) as u32
}

// =============================================================================
// Page Window
// =============================================================================

/// One element of the page-number control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageItem {
    /// A clickable page number.
    Page(u32),
    /// A collapsed gap of more than one page.
    Ellipsis,
}

/// Computes the page-number window for the pagination control.
///
/// ## Contract
/// - page 1 and page `total_pages` are always shown
/// - `current - 1`, `current`, `current + 1` are always shown
/// - any gap larger than one page collapses into a single ellipsis
///
/// ## Example
/// ```rust
/// use officine_core::pagination::{page_window, PageItem};
///
/// let window = page_window(5, 5);
/// assert_eq!(
///     window,
///     vec![
///         PageItem::Page(1),
///         PageItem::Ellipsis,
///         PageItem::Page(4),
///         PageItem::Page(5),
///     ]
/// );
/// ```
pub fn page_window(total_pages: u32, current: u32) -> Vec<PageItem> {
    let total = i64::from(total_pages.max(1));
    let current = i64::from(current);

    let mut window = Vec::new();
    for n in 1..=total {
        if n == 1 || n == total || (current - 1..=current + 1).contains(&n) {
            window.push(PageItem::Page(n as u32));
        } else if n == current - 2 || n == current + 2 {
            // Single marker per gap: the positions just outside the
            // neighbour range are the only ones that can emit it.
            window.push(PageItem::Ellipsis);
        }
    }
    window
}

// =============================================================================
// Fetch Spec
// =============================================================================

/// What the caller must fetch after a state transition.
///
/// `seq` identifies the request: a result carried back with an older
/// seq than the state's current one belongs to a superseded
/// `(page, per_page)` pair and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSpec {
    pub seq: u64,
    pub page: u32,
    pub per_page: u32,
}

// =============================================================================
// List State
// =============================================================================

/// Pagination state for one list screen.
///
/// Created when the screen mounts, dropped when it unmounts; nothing
/// persists across mounts.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    page: u32,
    page_size: u32,
    data: Option<ListPage<T>>,
    loading: bool,
    last_error: Option<String>,
    seq: u64,
}

impl<T> ListState<T> {
    /// Creates the state for a freshly mounted screen.
    pub fn new(page_size: u32) -> Self {
        ListState {
            page: 1,
            page_size: page_size.max(1),
            data: None,
            loading: false,
            last_error: None,
            seq: 0,
        }
    }

    /// The fetch a screen issues on mount (page 1, configured size).
    pub fn initial_fetch(&mut self) -> FetchSpec {
        self.begin()
    }

    /// Requests navigation to page `n`.
    ///
    /// No-op (returns `None`) when `n` is outside `[1, total_pages]` of
    /// the previously committed page, or when no data has been
    /// committed yet and `n != 1`. Re-selecting the current page is
    /// also a no-op, matching the screen's behaviour.
    pub fn set_page(&mut self, n: u32) -> Option<FetchSpec> {
        match self.known_total_pages() {
            Some(total) => {
                if n < 1 || n > total {
                    return None;
                }
            }
            None => {
                if n != 1 {
                    return None;
                }
            }
        }
        if n == self.page {
            return None;
        }
        self.page = n;
        Some(self.begin())
    }

    /// Changes the window size.
    ///
    /// A size below 1 is rejected. Any accepted size resets `page` to 1:
    /// the prior page index is meaningless under a different window.
    pub fn set_page_size(&mut self, n: u32) -> Option<FetchSpec> {
        if n < 1 {
            return None;
        }
        self.page_size = n;
        self.page = 1;
        Some(self.begin())
    }

    /// Re-fetches the current `(page, page_size)` without changing them.
    ///
    /// Used by the refresh coordinator after a successful write.
    pub fn refresh(&mut self) -> FetchSpec {
        self.begin()
    }

    fn begin(&mut self) -> FetchSpec {
        self.seq += 1;
        self.loading = true;
        self.last_error = None;
        FetchSpec {
            seq: self.seq,
            page: self.page,
            per_page: self.page_size,
        }
    }

    /// Commits a successful fetch result.
    ///
    /// Returns `false` (and changes nothing) when `seq` does not match
    /// the most recently issued fetch: the result belongs to a stale
    /// `(page, per_page)` pair and must not overwrite a newer one.
    pub fn apply_success(&mut self, seq: u64, page: ListPage<T>) -> bool {
        if seq != self.seq {
            return false;
        }
        self.loading = false;
        self.last_error = None;
        self.data = Some(page);
        true
    }

    /// Records a failed fetch.
    ///
    /// Prior items stay in place; only the error and the loading flag
    /// change. Stale failures are discarded like stale successes.
    pub fn apply_failure(&mut self, seq: u64, message: impl Into<String>) -> bool {
        if seq != self.seq {
            return false;
        }
        self.loading = false;
        self.last_error = Some(message.into());
        true
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The last committed page, if any fetch has succeeded yet.
    pub fn data(&self) -> Option<&ListPage<T>> {
        self.data.as_ref()
    }

    /// Page count derived from the last committed page.
    pub fn known_total_pages(&self) -> Option<u32> {
        self.data.as_ref().map(ListPage::total_pages)
    }

    /// The page-number control for the current state (a bare page 1
    /// before any data arrives).
    pub fn pager(&self) -> Vec<PageItem> {
        page_window(self.known_total_pages().unwrap_or(1), self.page)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(items: usize, current_page: u32, per_page: u32, total: u64) -> ListPage<u32> {
        ListPage {
            items: (0..items as u32).collect(),
            current_page,
            per_page,
            total,
        }
    }

    #[test]
    fn test_total_pages_ceiling_and_floor() {
        assert_eq!(total_pages(0, 5), 1);
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(23, 5), 5);
        assert_eq!(total_pages(23, 1), 23);
    }

    #[test]
    fn test_page_window_small_counts() {
        assert_eq!(page_window(1, 1), vec![PageItem::Page(1)]);
        assert_eq!(
            page_window(3, 2),
            vec![PageItem::Page(1), PageItem::Page(2), PageItem::Page(3)]
        );
    }

    #[test]
    fn test_page_window_collapses_gaps() {
        // 10 pages, standing on 5: [1, …, 4, 5, 6, …, 10]
        assert_eq!(
            page_window(10, 5),
            vec![
                PageItem::Page(1),
                PageItem::Ellipsis,
                PageItem::Page(4),
                PageItem::Page(5),
                PageItem::Page(6),
                PageItem::Ellipsis,
                PageItem::Page(10),
            ]
        );
    }

    #[test]
    fn test_page_window_no_ellipsis_for_gap_of_one() {
        // 4 pages on page 2: neighbours already touch both ends.
        assert_eq!(
            page_window(4, 2),
            vec![
                PageItem::Page(1),
                PageItem::Page(2),
                PageItem::Page(3),
                PageItem::Page(4),
            ]
        );
    }

    #[test]
    fn test_page_window_holds_for_every_valid_current() {
        for total in 1..=25u32 {
            for current in 1..=total {
                let window = page_window(total, current);
                assert_eq!(window.first(), Some(&PageItem::Page(1)));
                assert_eq!(window.last(), Some(&PageItem::Page(total)));
                for shown in [current.saturating_sub(1).max(1), current, (current + 1).min(total)] {
                    assert!(window.contains(&PageItem::Page(shown)));
                }
                // Never two ellipses in a row.
                for pair in window.windows(2) {
                    assert!(pair != [PageItem::Ellipsis, PageItem::Ellipsis]);
                }
            }
        }
    }

    #[test]
    fn test_set_page_before_any_data_only_page_one() {
        let mut state: ListState<u32> = ListState::new(5);
        assert!(state.set_page(2).is_none());
        assert!(state.set_page(0).is_none());
        // Re-selecting page 1 (the current page) is a no-op as well.
        assert!(state.set_page(1).is_none());
    }

    #[test]
    fn test_set_page_rejects_out_of_range() {
        let mut state: ListState<u32> = ListState::new(5);
        let spec = state.initial_fetch();
        assert!(state.apply_success(spec.seq, page_of(5, 1, 5, 23)));
        assert_eq!(state.known_total_pages(), Some(5));

        assert!(state.set_page(6).is_none());
        assert!(state.set_page(0).is_none());
        assert_eq!(state.page(), 1);
        assert!(!state.is_loading());

        let spec = state.set_page(5).expect("page 5 is in range");
        assert_eq!(spec.page, 5);
        assert!(state.is_loading());
    }

    #[test]
    fn test_set_page_size_resets_page() {
        let mut state: ListState<u32> = ListState::new(5);
        let spec = state.initial_fetch();
        state.apply_success(spec.seq, page_of(5, 1, 5, 100));
        let spec = state.set_page(4).unwrap();
        state.apply_success(spec.seq, page_of(5, 4, 5, 100));
        assert_eq!(state.page(), 4);

        let spec = state.set_page_size(20).expect("valid size");
        assert_eq!(state.page(), 1);
        assert_eq!(spec.page, 1);
        assert_eq!(spec.per_page, 20);

        assert!(state.set_page_size(0).is_none());
    }

    #[test]
    fn test_every_selector_option_is_accepted() {
        assert_eq!(crate::DEFAULT_PAGE_SIZE, crate::PAGE_SIZE_OPTIONS[0]);

        let mut state: ListState<u32> = ListState::new(crate::DEFAULT_PAGE_SIZE);
        let spec = state.initial_fetch();
        state.apply_success(spec.seq, page_of(5, 1, 5, 100));

        for &size in &crate::PAGE_SIZE_OPTIONS {
            let spec = state.set_page_size(size).expect("selector option");
            assert_eq!((spec.page, spec.per_page), (1, size));
            state.apply_success(spec.seq, page_of(size as usize, 1, size, 100));
        }
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut state: ListState<u32> = ListState::new(5);
        let first = state.initial_fetch();
        let second = state.set_page_size(10).unwrap();
        assert!(second.seq > first.seq);

        // The newer request resolves first.
        assert!(state.apply_success(second.seq, page_of(10, 1, 10, 23)));
        assert!(!state.is_loading());

        // The older one straggles in afterwards and must be dropped.
        assert!(!state.apply_success(first.seq, page_of(5, 1, 5, 23)));
        assert_eq!(state.data().unwrap().per_page, 10);

        // Stale failures are dropped the same way.
        assert!(!state.apply_failure(first.seq, "timeout"));
        assert!(state.last_error().is_none());
    }

    #[test]
    fn test_failure_keeps_prior_items() {
        let mut state: ListState<u32> = ListState::new(5);
        let spec = state.initial_fetch();
        state.apply_success(spec.seq, page_of(5, 1, 5, 23));

        let spec = state.set_page(2).unwrap();
        assert!(state.apply_failure(spec.seq, "connection reset"));
        assert!(!state.is_loading());
        assert_eq!(state.last_error(), Some("connection reset"));
        // Stale-but-present data survives the failed fetch.
        assert_eq!(state.data().unwrap().items.len(), 5);
    }

    #[test]
    fn test_refresh_keeps_parameters() {
        let mut state: ListState<u32> = ListState::new(5);
        let spec = state.initial_fetch();
        state.apply_success(spec.seq, page_of(5, 1, 5, 23));
        let spec = state.set_page(3).unwrap();
        state.apply_success(spec.seq, page_of(5, 3, 5, 23));

        let refresh = state.refresh();
        assert_eq!((refresh.page, refresh.per_page), (3, 5));
    }

    #[test]
    fn test_ledger_of_23_items_at_5_per_page() {
        // End-to-end pagination property: 23 items, window of 5.
        let mut state: ListState<u32> = ListState::new(5);
        let spec = state.initial_fetch();
        state.apply_success(spec.seq, page_of(5, 1, 5, 23));
        assert_eq!(state.known_total_pages(), Some(5));

        // Page 6 does not exist and is rejected.
        assert!(state.set_page(6).is_none());

        // Page 5 exists; its window renders [1, …, 4, 5].
        let spec = state.set_page(5).unwrap();
        state.apply_success(spec.seq, page_of(3, 5, 5, 23));
        assert_eq!(
            state.pager(),
            vec![
                PageItem::Page(1),
                PageItem::Ellipsis,
                PageItem::Page(4),
                PageItem::Page(5),
            ]
        );
    }
}

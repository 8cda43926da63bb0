//! # officine-core: Pure Screen Logic for the Officine Console
//!
//! This crate is the **heart** of the console. It contains the recurring
//! design logic shared by every list screen as pure state machines with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Officine Console Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Frontend (JS shell)                         │   │
//! │  │    Login ──► Dashboard ──► Products table ──► Ventes table     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 officine-console (controllers)                  │   │
//! │  │    ListController, ProductEditor, SaleComposer, Refresh        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ officine-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │pagination │  │   edit    │  │sale_draft │  │   │
//! │  │   │  Produit  │  │ ListState │  │  Phases   │  │ SaleLine  │  │   │
//! │  │   │   Vente   │  │PageWindow │  │ workcopy  │  │  totals   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO TIMERS • PURE TRANSITIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               officine-gateway (Remote Data Gateway)            │   │
//! │  │          GraphQL read path, REST write path, session token      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire DTOs (Produit, Vente, Famille, ListPage, etc.)
//! - [`pagination`] - Paginated list state machine and page-window math
//! - [`edit`] - Modal edit session lifecycle (Closed → Opening → Open → …)
//! - [`product_form`] - Product working copy and REST payload shaping
//! - [`sale_draft`] - Sale line items, quantity clamping, totals
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: State changes return what the caller must do
//!    next (e.g. a [`pagination::FetchSpec`]); they never do it themselves
//! 2. **No I/O**: Network, timers and storage are FORBIDDEN here
//! 3. **Stale results are data, not events**: a fetch result carries the
//!    sequence number of the request that produced it, and the state
//!    machine decides whether it may still be applied
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod edit;
pub mod error;
pub mod pagination;
pub mod product_form;
pub mod sale_draft;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use officine_core::ListState` instead of
// `use officine_core::pagination::ListState`

pub use edit::{EditSession, Phase, RecordForm, WriteOutcome, CLOSE_DELAY, OPEN_DELAY};
pub use error::{CoreError, CoreResult};
pub use pagination::{page_window, total_pages, FetchSpec, ListState, PageItem};
pub use product_form::ProductForm;
pub use sale_draft::{SaleDraft, SaleLine};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page size used when a list screen mounts.
///
/// ## Why 5?
/// Matches the first option of the per-page selector; the backoffice
/// tables are dense and the default keeps the initial query cheap.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// The per-page options offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [u32; 5] = [5, 10, 20, 30, 50];

//! # Officine Console - Screen Controllers
//!
//! The async layer between the pure state machines of `officine-core`
//! and the remote gateway. Each screen of the admin console maps to
//! one controller here.
//!
//! ## Controller Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Console Controller Layout                          │
//! │                                                                         │
//! │  ┌──────────┐   restore / login / logout                                │
//! │  │  Shell   │──────────────────────────────► SessionStore + me()       │
//! │  └────┬─────┘                                                           │
//! │       │ signed in                                                       │
//! │       ▼                                                                 │
//! │  ┌─────────────────┐  FetchSpec   ┌──────────────┐                     │
//! │  │ ListController  │─────────────►│ RecordSource │──► gateway          │
//! │  │ (ListState)     │◄─────────────│  fetch_page  │                     │
//! │  └────────▲────────┘  apply(seq)  └──────────────┘                     │
//! │           │ refresh()                                                   │
//! │  ┌────────┴────────────┐          ┌──────────────┐                     │
//! │  │ RefreshCoordinator  │─────────►│   Notifier   │ (single slot,       │
//! │  └────────▲────────────┘  notice  └──────────────┘  auto-dismiss)      │
//! │           │ completed(msg)                                              │
//! │  ┌────────┴────────┐  ┌─────────────────┐  ┌──────────────┐            │
//! │  │  ProductEditor  │  │  SaleComposer   │  │  SearchBox   │            │
//! │  │  (EditSession)  │  │  (EditSession)  │  │  (debounced) │            │
//! │  └─────────────────┘  └─────────────────┘  └──────────────┘            │
//! │                                                                         │
//! │  ORDERING RULE: after a successful write, the coordinator refreshes    │
//! │  the list FIRST, then posts the notice. Exactly one of each.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod list;
pub mod notify;
pub mod product_editor;
pub mod refresh;
pub mod sale_composer;
pub mod search;
pub mod shell;
pub mod source;

pub use error::{ConsoleError, ConsoleResult};
pub use list::ListController;
pub use notify::{Notice, NoticeKind, Notifier, DISMISS_AFTER};
pub use product_editor::{ProductBackend, ProductEditor};
pub use refresh::{RefreshCoordinator, Refreshable};
pub use sale_composer::{SaleBackend, SaleComposer};
pub use search::{SearchBox, SearchBackend, DEBOUNCE_DELAY};
pub use shell::{Gate, Shell};
pub use source::{ProductSource, RecordSource, VenteSource};

//! # Edit Session
//!
//! Lifecycle of creating or editing one record through a modal.
//!
//! ## Phase Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Edit Session Phases                                 │
//! │                                                                         │
//! │            open(target, form)          OPEN_DELAY (≈50ms)               │
//! │   Closed ─────────────────────► Opening ─────────────────► Open        │
//! │     ▲                                                        │          │
//! │     │                                      commit() / cancel()          │
//! │     │        CLOSE_DELAY (≈300ms)                            ▼          │
//! │     └──────────────────────────────────────────────────── Closing      │
//! │                                                                         │
//! │  Opening/Closing exist purely to sequence the enter/exit animation.    │
//! │  They NEVER gate business logic: the detail fetch for an edit runs     │
//! │  while the modal is still Opening.                                      │
//! │                                                                         │
//! │  A failed submit is not a transition: the session stays Open and the   │
//! │  working copy survives so the user can correct and retry.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Working Copy Ownership
//! The working copy exists only while the phase is not `Closed` and is
//! discarded entirely on `mark_closed`, commit and cancel alike - no
//! stale carry-over into the next session.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::types::RecordId;

/// Delay before a freshly opened modal reaches `Open`.
pub const OPEN_DELAY: Duration = Duration::from_millis(50);

/// Delay before a closing modal is fully `Closed`.
pub const CLOSE_DELAY: Duration = Duration::from_millis(300);

// =============================================================================
// Phase
// =============================================================================

/// Modal lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Closed,
    Opening,
    Open,
    Closing,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Closed
    }
}

// =============================================================================
// Record Form
// =============================================================================

/// A working copy that can shape itself into a REST write payload.
///
/// `id` is `Some` iff the session edits an existing record; a create
/// payload NEVER carries an id field.
pub trait RecordForm {
    fn write_payload(&self, id: Option<RecordId>) -> Value;
}

// =============================================================================
// Write Outcome
// =============================================================================

/// Signal emitted on a successful submit, consumed by the refresh
/// coordinator. A failed submit emits nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Whether the write created a new record (as opposed to updating).
    pub was_create: bool,
}

// =============================================================================
// Edit Session
// =============================================================================

/// State of one create/edit modal.
///
/// Construction and destruction are owned by the screen: the screen
/// calls [`open`](EditSession::open) when a "new"/"edit" action fires
/// and [`mark_closed`](EditSession::mark_closed) once the exit delay
/// elapsed.
#[derive(Debug, Clone, Default)]
pub struct EditSession<F> {
    phase: Phase,
    target_id: Option<RecordId>,
    form: Option<F>,
}

impl<F: RecordForm> EditSession<F> {
    pub fn new() -> Self {
        EditSession {
            phase: Phase::Closed,
            target_id: None,
            form: None,
        }
    }

    /// Opens the session with a working copy.
    ///
    /// `target_id = None` means a new record (empty form);
    /// `target_id = Some(..)` means editing, with `form` hydrated from
    /// the server-fetched detail projection.
    pub fn open(&mut self, target_id: Option<RecordId>, form: F) -> CoreResult<()> {
        if self.phase != Phase::Closed {
            return Err(CoreError::SessionBusy(self.phase));
        }
        self.phase = Phase::Opening;
        self.target_id = target_id;
        self.form = Some(form);
        Ok(())
    }

    /// Advances `Opening → Open` once the enter delay elapsed.
    pub fn mark_open(&mut self) {
        if self.phase == Phase::Opening {
            self.phase = Phase::Open;
        }
    }

    /// Builds the write payload for a submit.
    ///
    /// For a new record the payload carries no id; for an edit the
    /// original target id is always included.
    pub fn submit_payload(&self) -> CoreResult<Value> {
        if self.phase != Phase::Open {
            return Err(CoreError::SessionNotOpen(self.phase));
        }
        let form = self
            .form
            .as_ref()
            .ok_or(CoreError::SessionNotOpen(self.phase))?;
        Ok(form.write_payload(self.target_id))
    }

    /// Records a successful write and begins closing.
    pub fn commit(&mut self) -> CoreResult<WriteOutcome> {
        if self.phase != Phase::Open {
            return Err(CoreError::SessionNotOpen(self.phase));
        }
        let outcome = WriteOutcome {
            was_create: self.is_new_record(),
        };
        self.phase = Phase::Closing;
        Ok(outcome)
    }

    /// Begins closing without any write; the working copy is discarded
    /// when the close completes.
    pub fn cancel(&mut self) {
        if matches!(self.phase, Phase::Opening | Phase::Open) {
            self.phase = Phase::Closing;
        }
    }

    /// Completes the close once the exit delay elapsed, dropping the
    /// working copy entirely.
    pub fn mark_closed(&mut self) {
        if self.phase == Phase::Closing {
            self.phase = Phase::Closed;
            self.target_id = None;
            self.form = None;
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn target_id(&self) -> Option<RecordId> {
        self.target_id
    }

    /// Whether this session creates a record (no target id).
    pub fn is_new_record(&self) -> bool {
        self.target_id.is_none()
    }

    pub fn form(&self) -> Option<&F> {
        self.form.as_ref()
    }

    /// Mutable working copy access, available only while the modal has
    /// not started closing.
    pub fn form_mut(&mut self) -> Option<&mut F> {
        match self.phase {
            Phase::Opening | Phase::Open => self.form.as_mut(),
            Phase::Closed | Phase::Closing => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

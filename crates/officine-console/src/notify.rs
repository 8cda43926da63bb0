//! # Notification Slot
//!
//! One notice at a time: a new notice replaces the current one
//! immediately and restarts the dismissal clock. Each notice carries a
//! seq so the auto-dismiss task of a replaced notice cannot clear its
//! successor.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// How long a notice stays up before dismissing itself.
pub const DISMISS_AFTER: Duration = Duration::from_secs(3);

/// Visual severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// One transient notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Default)]
struct Slot {
    seq: u64,
    current: Option<Notice>,
}

/// The shared notification slot.
#[derive(Clone, Default)]
pub struct Notifier {
    slot: Arc<Mutex<Slot>>,
}

impl Notifier {
    pub fn new() -> Self {
        Notifier::default()
    }

    pub async fn success(&self, message: impl Into<String>) {
        self.post(NoticeKind::Success, message.into()).await;
    }

    pub async fn error(&self, message: impl Into<String>) {
        self.post(NoticeKind::Error, message.into()).await;
    }

    /// Posts a notice, replacing whatever is up, and arms its
    /// auto-dismiss.
    async fn post(&self, kind: NoticeKind, message: String) {
        debug!(message = %message, "Posting notice");

        let seq = {
            let mut slot = self.slot.lock().await;
            slot.seq += 1;
            slot.current = Some(Notice { kind, message });
            slot.seq
        };

        let slot = self.slot.clone();
        tokio::spawn(async move {
            tokio::time::sleep(DISMISS_AFTER).await;
            let mut slot = slot.lock().await;
            // A replaced notice's clock must not clear its successor.
            if slot.seq == seq {
                slot.current = None;
            }
        });
    }

    /// Dismisses the current notice immediately.
    pub async fn dismiss(&self) {
        self.slot.lock().await.current = None;
    }

    /// The notice currently up, if any.
    pub async fn current(&self) -> Option<Notice> {
        self.slot.lock().await.current.clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

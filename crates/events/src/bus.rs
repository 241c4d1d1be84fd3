//! In-process notice bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`NoticeBus`] is the publish/subscribe hub for [`Notice`]s. It is
//! designed to be shared by reference (or via `Arc`) between the store
//! layer, which publishes, and the presentation layer, which renders.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A short, human-readable status message.
///
/// Notices are an observable side effect, not part of any operation's
/// return contract: tests subscribe to the bus instead of asserting on
/// return values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// When the notice was published (UTC).
    pub timestamp: DateTime<Utc>,
}

impl Notice {
    /// Build a success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Build an error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// NoticeBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out bus for [`Notice`]s.
///
/// Wraps a [`broadcast::Sender`] so any number of subscribers can
/// independently receive every published notice.
pub struct NoticeBus {
    sender: broadcast::Sender<Notice>,
}

impl NoticeBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed notices are
    /// dropped and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a notice to all current subscribers.
    ///
    /// If there are no active subscribers the notice is silently dropped.
    pub fn publish(&self, notice: Notice) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(notice);
    }

    /// Shorthand for publishing a success notice.
    pub fn success(&self, message: impl Into<String>) {
        self.publish(Notice::success(message));
    }

    /// Shorthand for publishing an error notice.
    pub fn error(&self, message: impl Into<String>) {
        self.publish(Notice::error(message));
    }

    /// Subscribe to all notices published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Outcome of reconciling one event.

use std::fmt;

/// What reconciling one candidate did to the remote calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// An identical event already existed; nothing was sent.
    Skipped,
    /// A stale event in the same slot was deleted and the candidate added.
    Replaced,
    /// No event occupied the slot; the candidate was added.
    Inserted,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncAction::Skipped => write!(f, "="),
            SyncAction::Replaced => write!(f, "~"),
            SyncAction::Inserted => write!(f, "+"),
        }
    }
}

//! Reconciliation of freshly derived events against a remote calendar.

mod action;
mod decide;

pub use action::SyncAction;
pub use decide::{Decision, decide};

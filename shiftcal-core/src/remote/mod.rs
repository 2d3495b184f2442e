//! Boundary to the remote calendar service.
//!
//! Transport (CalDAV, credentials, discovery) lives outside this crate. A
//! backend only has to list its calendars and, per calendar, search, add and
//! delete raw ICS objects.

mod memory;

use std::future::Future;

use crate::date_range::DateRange;
use crate::error::ShiftCalResult;
use crate::event::BackingRef;

pub use memory::{MemoryCollection, MemoryPrincipal};

/// A remote calendar object as returned by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub href: String,
    pub etag: Option<String>,
    pub data: String,
}

/// A single remote calendar.
///
/// Failures should be reported as [`crate::ShiftCalError::Transport`]; callers
/// propagate them unchanged and never retry.
pub trait Collection {
    /// Display name used to pick the calendar by name.
    fn display_name(&self) -> &str;

    /// All objects overlapping the range, in whatever order the remote chooses.
    fn search(
        &self,
        range: &DateRange,
    ) -> impl Future<Output = ShiftCalResult<Vec<RawEvent>>> + Send;

    /// Store a new object.
    fn add(&self, ics: &str) -> impl Future<Output = ShiftCalResult<()>> + Send;

    /// Delete the object behind a back reference.
    fn delete(&self, backing: &BackingRef) -> impl Future<Output = ShiftCalResult<()>> + Send;
}

/// The account owning a set of calendars.
pub trait Principal {
    type Collection: Collection;

    fn calendars(&self) -> impl Future<Output = ShiftCalResult<Vec<Self::Collection>>> + Send;
}

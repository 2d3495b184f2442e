//! Skip / replace / insert decision for a single candidate.

use tracing::debug;

use crate::error::ShiftCalResult;
use crate::event::EventRecord;

/// Outcome of comparing a candidate against the events already in its window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision<'a> {
    /// `matched` has the same slot, title and content.
    Skip { matched: &'a EventRecord },
    /// `stale` has the same slot and title but different content.
    Replace { stale: &'a EventRecord },
    Insert,
}

/// Decide what to do with `candidate` given the `existing` events, scanned in order.
///
/// Events are matched by display string (same summary and same start/end to
/// the minute). Only the first match is considered: identical content means
/// skip, anything else means that match is stale.
pub fn decide<'a>(
    candidate: &EventRecord,
    existing: &'a [EventRecord],
) -> ShiftCalResult<Decision<'a>> {
    let key = candidate.display_string()?;

    for other in existing {
        let other_key = other.display_string()?;
        debug!(existing = %other_key, "Comparing");

        if other_key != key {
            continue;
        }

        if candidate.same_content(other) {
            return Ok(Decision::Skip { matched: other });
        }
        return Ok(Decision::Replace { stale: other });
    }

    Ok(Decision::Insert)
}

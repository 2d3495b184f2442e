//! A remote calendar opened for syncing.

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::config::SyncConfig;
use crate::date_range::DateRange;
use crate::error::{ShiftCalError, ShiftCalResult};
use crate::event::EventRecord;
use crate::ics::generate_ics;
use crate::remote::{Collection, Principal};
use crate::sync::{Decision, SyncAction, decide};

/// Display names of every calendar the principal owns.
pub async fn calendar_names<P: Principal>(principal: &P) -> ShiftCalResult<Vec<String>> {
    Ok(principal
        .calendars()
        .await?
        .iter()
        .map(|c| c.display_name().to_string())
        .collect())
}

/// One remote calendar plus the settings used to sync into it.
///
/// Mutating operations take `&mut self`, so a handle runs at most one
/// reconciliation at a time.
pub struct Calendar<C: Collection> {
    collection: C,
    config: SyncConfig,
}

impl<C: Collection> Calendar<C> {
    pub fn new(collection: C, config: SyncConfig) -> Self {
        Calendar { collection, config }
    }

    /// Open the principal's calendar whose display name matches `name`, ignoring case.
    pub async fn open<P>(principal: &P, name: &str, config: SyncConfig) -> ShiftCalResult<Self>
    where
        P: Principal<Collection = C>,
    {
        let wanted = name.to_lowercase();

        principal
            .calendars()
            .await?
            .into_iter()
            .find(|c| c.display_name().to_lowercase() == wanted)
            .map(|collection| Calendar::new(collection, config))
            .ok_or_else(|| ShiftCalError::CalendarNotFound(name.to_string()))
    }

    pub fn name(&self) -> &str {
        self.collection.display_name()
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Events overlapping the range, each keeping a reference to its remote object.
    pub async fn events(&self, range: &DateRange) -> ShiftCalResult<Vec<EventRecord>> {
        let raw = self.collection.search(range).await?;
        Ok(raw.iter().map(EventRecord::from_remote).collect())
    }

    /// Add `candidate` unless an identical event already occupies its slot.
    ///
    /// A same-slot event with different summary/description/location is
    /// deleted first. The delete and the add are not atomic: if the add fails
    /// the stale event stays deleted.
    pub async fn add_event(&mut self, candidate: &EventRecord) -> ShiftCalResult<SyncAction> {
        let range = DateRange::around(
            candidate.start()?,
            candidate.end()?,
            self.config.search_padding_days,
        )?;

        let mut existing = self.events(&range).await?;
        debug!(count = existing.len(), calendar = %self.name(), "Looking at existing events");

        if self.config.sort_existing_by_start {
            existing.sort_by_key(|e| e.start().ok());
        }

        let action = match decide(candidate, &existing)? {
            Decision::Skip { .. } => {
                info!(event = %candidate, "Skipping");
                SyncAction::Skipped
            }
            Decision::Replace { stale } => {
                info!(event = %stale, "Deleting");
                stale.remove(&self.collection).await?;

                let mut fresh = candidate.clone();
                if self.config.bump_sequence_on_replace {
                    fresh.sequence = fresh.sequence.max(stale.sequence.saturating_add(1));
                }
                self.push(&fresh).await?;
                SyncAction::Replaced
            }
            Decision::Insert => {
                self.push(candidate).await?;
                SyncAction::Inserted
            }
        };

        Ok(action)
    }

    /// Reconcile a batch of candidates one after another, stopping at the first error.
    pub async fn sync_all<'a, I>(&mut self, candidates: I) -> ShiftCalResult<Vec<SyncAction>>
    where
        I: IntoIterator<Item = &'a EventRecord>,
    {
        let mut actions = Vec::new();
        for candidate in candidates {
            actions.push(self.add_event(candidate).await?);
        }
        Ok(actions)
    }

    pub async fn remove_event(&mut self, event: &EventRecord) -> ShiftCalResult<()> {
        event.remove(&self.collection).await
    }

    /// Delete every event in `[today 00:00, today + purge_window_days]`.
    /// Returns how many were removed.
    pub async fn purge_window(&mut self, today: NaiveDate) -> ShiftCalResult<usize> {
        let range = DateRange::days_from(today, self.config.purge_window_days)?;

        let events = self.events(&range).await?;
        for event in &events {
            info!(event = %event, "Removing");
            event.remove(&self.collection).await?;
        }

        Ok(events.len())
    }

    /// [`Calendar::purge_window`] starting today.
    pub async fn purge_upcoming(&mut self) -> ShiftCalResult<usize> {
        self.purge_window(Local::now().date_naive()).await
    }

    async fn push(&self, event: &EventRecord) -> ShiftCalResult<()> {
        info!(event = %event, "Adding");
        self.collection.add(&generate_ics(event)).await
    }
}

//! In-process collection, for dry runs and tests.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::date_range::DateRange;
use crate::error::{ShiftCalError, ShiftCalResult};
use crate::event::{BackingRef, EventRecord};
use crate::remote::{Collection, Principal, RawEvent};

#[derive(Debug, Default)]
struct MemoryState {
    objects: Vec<RawEvent>,
    next_id: u64,
    adds: Vec<String>,
    deletes: Vec<BackingRef>,
    fail_search: Option<String>,
    fail_add: Option<String>,
    fail_delete: Option<String>,
}

impl MemoryState {
    fn store(&mut self, ics: &str) -> BackingRef {
        self.next_id += 1;
        let backing = BackingRef {
            href: format!("event-{}.ics", self.next_id),
            etag: Some(format!("\"{}\"", self.next_id)),
        };
        self.objects.push(RawEvent {
            href: backing.href.clone(),
            etag: backing.etag.clone(),
            data: ics.to_string(),
        });
        backing
    }
}

/// A calendar held in memory. Clones share the same contents.
///
/// Every `add`/`delete` call is recorded, and the next call of each kind can be
/// made to fail with a transport error.
#[derive(Debug, Clone)]
pub struct MemoryCollection {
    name: String,
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryCollection {
    pub fn new(name: &str) -> Self {
        MemoryCollection {
            name: name.to_string(),
            state: Arc::new(Mutex::new(MemoryState::default())),
        }
    }

    /// Store an object directly, without recording an `add` call.
    pub async fn insert(&self, ics: &str) -> BackingRef {
        self.state.lock().await.store(ics)
    }

    pub async fn objects(&self) -> Vec<RawEvent> {
        self.state.lock().await.objects.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.objects.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// ICS text of every `add` call, in order.
    pub async fn adds(&self) -> Vec<String> {
        self.state.lock().await.adds.clone()
    }

    /// Back reference of every `delete` call, in order.
    pub async fn deletes(&self) -> Vec<BackingRef> {
        self.state.lock().await.deletes.clone()
    }

    pub async fn fail_next_search(&self, message: &str) {
        self.state.lock().await.fail_search = Some(message.to_string());
    }

    pub async fn fail_next_add(&self, message: &str) {
        self.state.lock().await.fail_add = Some(message.to_string());
    }

    pub async fn fail_next_delete(&self, message: &str) {
        self.state.lock().await.fail_delete = Some(message.to_string());
    }
}

impl Collection for MemoryCollection {
    fn display_name(&self) -> &str {
        &self.name
    }

    async fn search(&self, range: &DateRange) -> ShiftCalResult<Vec<RawEvent>> {
        let mut state = self.state.lock().await;

        if let Some(message) = state.fail_search.take() {
            return Err(ShiftCalError::Transport(message));
        }

        // Objects with undecodable times are returned as-is, like a server
        // that cannot filter them would.
        let found = state
            .objects
            .iter()
            .filter(|raw| {
                let event = EventRecord::from_ics(&raw.data);
                match (event.start(), event.end()) {
                    (Ok(start), Ok(end)) => range.overlaps(start, end),
                    _ => true,
                }
            })
            .cloned()
            .collect();

        Ok(found)
    }

    async fn add(&self, ics: &str) -> ShiftCalResult<()> {
        let mut state = self.state.lock().await;

        if let Some(message) = state.fail_add.take() {
            return Err(ShiftCalError::Transport(message));
        }

        state.adds.push(ics.to_string());
        state.store(ics);
        Ok(())
    }

    async fn delete(&self, backing: &BackingRef) -> ShiftCalResult<()> {
        let mut state = self.state.lock().await;

        if let Some(message) = state.fail_delete.take() {
            return Err(ShiftCalError::Transport(message));
        }

        let position = state
            .objects
            .iter()
            .position(|raw| raw.href == backing.href)
            .ok_or_else(|| ShiftCalError::Transport(format!("404 Not Found: {}", backing.href)))?;

        state.objects.remove(position);
        state.deletes.push(backing.clone());
        Ok(())
    }
}

/// An account holding several in-memory calendars.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrincipal {
    calendars: Vec<MemoryCollection>,
}

impl MemoryPrincipal {
    pub fn new(calendars: Vec<MemoryCollection>) -> Self {
        MemoryPrincipal { calendars }
    }
}

impl Principal for MemoryPrincipal {
    type Collection = MemoryCollection;

    async fn calendars(&self) -> ShiftCalResult<Vec<MemoryCollection>> {
        Ok(self.calendars.clone())
    }
}

//! The normalized event record.
//!
//! Timestamps are kept in their wire form (`YYYYMMDDTHHMMSS`) and only decoded
//! when read, at minute precision. Records come from one of two places: a fresh
//! draft assembled by client code, or a remote object hydrated through the ICS
//! parser, which also keeps a back reference used for deletion.

use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use rand::RngCore;

use crate::constants::TIMESTAMP_FORMAT;
use crate::error::{ShiftCalError, ShiftCalResult};
use crate::ics::parse_event;
use crate::remote::{Collection, RawEvent};

/// Reference to the remote object an event was hydrated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackingRef {
    pub href: String,
    pub etag: Option<String>,
}

/// A single calendar event (one work shift).
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub(crate) uid: String,
    pub summary: String,
    pub description: String,
    pub location: String,
    /// Timezone identifier attached to DTSTART/DTEND/DTSTAMP (empty for floating times)
    pub timezone: String,
    /// Revision counter (SEQUENCE)
    pub sequence: i64,

    pub(crate) start: String,
    pub(crate) end: String,
    pub(crate) created: String,
    pub(crate) last_modified: String,
    pub(crate) dtstamp: String,

    pub(crate) backing: Option<BackingRef>,
}

impl Default for EventRecord {
    fn default() -> Self {
        Self::new_draft()
    }
}

impl EventRecord {
    /// Create a fresh event with a generated uid and every timestamp set to now.
    pub fn new_draft() -> Self {
        let now = now_stamp();

        EventRecord {
            uid: generate_uid(),
            summary: String::new(),
            description: String::new(),
            location: String::new(),
            timezone: String::new(),
            sequence: 0,
            start: now.clone(),
            end: now.clone(),
            created: now.clone(),
            last_modified: now.clone(),
            dtstamp: now,
            backing: None,
        }
    }

    /// Hydrate an event from ICS text. The uid is taken from the text.
    pub fn from_ics(content: &str) -> Self {
        parse_event(content)
    }

    /// Hydrate an event from a remote object, keeping a reference to it for deletion.
    pub fn from_remote(raw: &RawEvent) -> Self {
        let mut event = parse_event(&raw.data);
        event.backing = Some(BackingRef {
            href: raw.href.clone(),
            etag: raw.etag.clone(),
        });
        event
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn backing(&self) -> Option<&BackingRef> {
        self.backing.as_ref()
    }

    pub fn start(&self) -> ShiftCalResult<NaiveDateTime> {
        decode_timestamp("DTSTART", &self.start)
    }

    pub fn end(&self) -> ShiftCalResult<NaiveDateTime> {
        decode_timestamp("DTEND", &self.end)
    }

    pub fn created(&self) -> ShiftCalResult<NaiveDateTime> {
        decode_timestamp("CREATED", &self.created)
    }

    pub fn last_modified(&self) -> ShiftCalResult<NaiveDateTime> {
        decode_timestamp("LAST-MODIFIED", &self.last_modified)
    }

    pub fn dtstamp(&self) -> ShiftCalResult<NaiveDateTime> {
        decode_timestamp("DTSTAMP", &self.dtstamp)
    }

    /// Move the start of the event. Refreshes LAST-MODIFIED.
    pub fn set_start(&mut self, start: NaiveDateTime) {
        self.touch();
        self.start = start.format(TIMESTAMP_FORMAT).to_string();
    }

    /// Move the end of the event. Refreshes LAST-MODIFIED.
    pub fn set_end(&mut self, end: NaiveDateTime) {
        self.touch();
        self.end = end.format(TIMESTAMP_FORMAT).to_string();
    }

    /// `"<summary> on MM/DD/YYYY from HH:MM to HH:MM"`
    ///
    /// Two events rendering the same string occupy the same slot with the same
    /// title. This is what the reconciler compares; it is not an identity key.
    pub fn display_string(&self) -> ShiftCalResult<String> {
        let start = self.start()?;
        let end = self.end()?;

        Ok(format!(
            "{} on {} from {} to {}",
            self.summary,
            start.format("%m/%d/%Y"),
            start.format("%H:%M"),
            end.format("%H:%M")
        ))
    }

    /// Whether summary, description and location all match exactly.
    pub fn same_content(&self, other: &EventRecord) -> bool {
        self.summary == other.summary
            && self.description == other.description
            && self.location == other.location
    }

    /// Delete the remote object this event was hydrated from.
    pub async fn remove<C: Collection>(&self, collection: &C) -> ShiftCalResult<()> {
        let backing = self
            .backing
            .as_ref()
            .ok_or_else(|| ShiftCalError::NoBackingObject(self.to_string()))?;

        collection.delete(backing).await
    }

    /// Set LAST-MODIFIED to now, never moving it backwards.
    fn touch(&mut self) {
        let now = Local::now().naive_local();

        let previous_is_later = self
            .last_modified()
            .is_ok_and(|previous| previous > now);

        if !previous_is_later {
            self.last_modified = now.format(TIMESTAMP_FORMAT).to_string();
        }
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_string() {
            Ok(s) => write!(f, "{}", s),
            Err(_) => write!(f, "{} ({} - {})", self.summary, self.start, self.end),
        }
    }
}

fn now_stamp() -> String {
    Local::now().naive_local().format(TIMESTAMP_FORMAT).to_string()
}

/// 16 random bytes as hex, grouped 8-4-4-4-12. Shaped like a UUID but carries
/// no version or variant bits.
fn generate_uid() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);

    let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();

    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

/// Decode a stored timestamp from its fixed offsets, ignoring seconds and any
/// trailing `Z`.
fn decode_timestamp(field: &'static str, value: &str) -> ShiftCalResult<NaiveDateTime> {
    let invalid = || ShiftCalError::InvalidTimestamp {
        field,
        value: value.to_string(),
    };
    let number = |from: usize, to: usize| {
        value
            .get(from..to)
            .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(invalid)
    };

    if value.get(8..9) != Some("T") {
        return Err(invalid());
    }

    let year = number(0, 4)? as i32;
    let date = NaiveDate::from_ymd_opt(year, number(4, 6)?, number(6, 8)?).ok_or_else(invalid)?;
    let time = NaiveTime::from_hms_opt(number(9, 11)?, number(11, 13)?, 0).ok_or_else(invalid)?;

    Ok(date.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MemoryCollection;
    use chrono::Duration;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_new_draft_stamps_all_timestamps_alike() {
        let event = EventRecord::new_draft();

        assert_eq!(event.start, event.end);
        assert_eq!(event.start, event.created);
        assert_eq!(event.start, event.dtstamp);
        assert_eq!(event.start, event.last_modified);
        assert_eq!(event.sequence, 0);
        assert!(event.summary.is_empty());
        assert!(event.backing().is_none());
    }

    #[test]
    fn test_uid_is_five_hex_groups() {
        let event = EventRecord::new_draft();
        let groups: Vec<&str> = event.uid().split('-').collect();

        let lengths: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(lengths, vec![8, 4, 4, 4, 12]);
        assert!(
            groups
                .iter()
                .all(|g| g.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()))
        );
    }

    #[test]
    fn test_uids_are_unique() {
        let a = EventRecord::new_draft();
        let b = EventRecord::new_draft();
        assert_ne!(a.uid(), b.uid());
    }

    #[test]
    fn test_display_string_format() {
        let mut event = EventRecord::new_draft();
        event.summary = "Shift A".to_string();
        event.set_start(at(2024, 3, 1, 9, 0));
        event.set_end(at(2024, 3, 1, 17, 30));

        assert_eq!(
            event.display_string().unwrap(),
            "Shift A on 03/01/2024 from 09:00 to 17:30"
        );
        assert_eq!(event.to_string(), "Shift A on 03/01/2024 from 09:00 to 17:30");
    }

    #[test]
    fn test_timestamps_truncate_to_minutes() {
        let mut event = EventRecord::new_draft();
        event.start = "20240301T091545Z".to_string();

        assert_eq!(event.start().unwrap(), at(2024, 3, 1, 9, 15));
    }

    #[test]
    fn test_invalid_timestamp_is_reported() {
        let mut event = EventRecord::new_draft();
        event.end = "20240301".to_string();

        match event.end() {
            Err(ShiftCalError::InvalidTimestamp { field, value }) => {
                assert_eq!(field, "DTEND");
                assert_eq!(value, "20240301");
            }
            other => panic!("Expected InvalidTimestamp, got {:?}", other),
        }
        assert!(event.display_string().is_err());
        assert!(event.to_string().contains("20240301"));
    }

    #[test]
    fn test_set_start_and_end_refresh_last_modified() {
        let mut event = EventRecord::new_draft();
        event.last_modified = "20000101T000000".to_string();
        let before = event.last_modified().unwrap();

        event.set_start(at(2024, 3, 1, 9, 0));
        let after_start = event.last_modified().unwrap();
        assert!(after_start > before);

        event.last_modified = "20000101T000000".to_string();
        event.set_end(at(2024, 3, 1, 17, 0));
        assert!(event.last_modified().unwrap() > before);
    }

    #[test]
    fn test_last_modified_never_moves_backwards() {
        let mut event = EventRecord::new_draft();
        let future = Local::now().naive_local() + Duration::days(2);
        event.last_modified = future.format(TIMESTAMP_FORMAT).to_string();
        let before = event.last_modified().unwrap();

        event.set_end(at(2024, 3, 1, 17, 0));

        assert!(event.last_modified().unwrap() >= before);
    }

    #[test]
    fn test_same_content_ignores_times() {
        let mut a = EventRecord::new_draft();
        a.summary = "Shift A".to_string();
        a.location = "Store 12".to_string();
        let mut b = a.clone();
        b.set_start(at(2030, 1, 1, 8, 0));
        assert!(a.same_content(&b));

        b.description = "Covering for Sam".to_string();
        assert!(!a.same_content(&b));
    }

    #[tokio::test]
    async fn test_remove_without_backing_object_fails() {
        let collection = MemoryCollection::new("Work");
        let mut event = EventRecord::new_draft();
        event.summary = "Shift A".to_string();

        let err = event.remove(&collection).await.unwrap_err();

        assert!(matches!(err, ShiftCalError::NoBackingObject(ref name) if name.starts_with("Shift A on")));
        assert!(collection.deletes().await.is_empty());
    }

    #[test]
    fn test_from_remote_keeps_backing_reference() {
        let raw = RawEvent {
            href: "/cal/work/abc.ics".to_string(),
            etag: Some("\"1\"".to_string()),
            data: "BEGIN:VEVENT\nUID:abc\nEND:VEVENT".to_string(),
        };

        let event = EventRecord::from_remote(&raw);

        assert_eq!(event.uid(), "abc");
        assert_eq!(
            event.backing(),
            Some(&BackingRef {
                href: "/cal/work/abc.ics".to_string(),
                etag: Some("\"1\"".to_string()),
            })
        );
    }
}

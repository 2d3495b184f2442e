//! ICS generation.

use crate::event::EventRecord;

/// Generate the .ics text for an event.
///
/// Properties are always emitted in the same order. Values are written as-is,
/// lines are joined with `\n` and never folded.
pub fn generate_ics(event: &EventRecord) -> String {
    let tz = if event.timezone.is_empty() {
        String::new()
    } else {
        format!(";TZID={}", event.timezone)
    };

    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("CREATED:{}", event.created),
        format!("DESCRIPTION:{}", event.description),
        format!("DTEND{}:{}", tz, event.end),
        format!("DTSTAMP{}:{}", tz, event.dtstamp),
        format!("DTSTART{}:{}", tz, event.start),
        format!("LAST-MODIFIED:{}", event.last_modified),
        format!("LOCATION:{}", event.location),
        format!("SEQUENCE:{}", event.sequence),
        format!("SUMMARY:{}", event.summary),
        format!("UID:{}", event.uid),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];

    lines.join("\n")
}

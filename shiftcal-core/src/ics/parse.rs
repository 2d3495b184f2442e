//! ICS parsing.

use tracing::warn;

use crate::constants::VENDOR_MARKERS;
use crate::event::EventRecord;

/// Event fields a property heading can map to, in matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Created,
    End,
    Start,
    LastModified,
    Dtstamp,
    Summary,
    Description,
    Location,
    Uid,
    Sequence,
}

impl Field {
    const ALL: [Field; 10] = [
        Field::Created,
        Field::End,
        Field::Start,
        Field::LastModified,
        Field::Dtstamp,
        Field::Summary,
        Field::Description,
        Field::Location,
        Field::Uid,
        Field::Sequence,
    ];

    fn name(self) -> &'static str {
        match self {
            Field::Created => "created",
            Field::End => "dtend",
            Field::Start => "dtstart",
            Field::LastModified => "last-modified",
            Field::Dtstamp => "dtstamp",
            Field::Summary => "summary",
            Field::Description => "description",
            Field::Location => "location",
            Field::Uid => "uid",
            Field::Sequence => "sequence",
        }
    }

    /// First field whose name is contained in the (lowercase) heading.
    fn for_heading(heading: &str) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|field| heading.contains(field.name()))
    }
}

/// Recombine continuation lines into logical property lines.
///
/// A line with a colon starts a new property. A line without one is appended
/// (space-joined) to the previous property, unless it carries a vendor marker:
/// then it is dropped, and so is every following continuation until the next
/// property line.
pub fn unfold(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut skipping = false;

    for line in content.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.contains(':') {
            skipping = false;
            lines.push(line.to_string());
            continue;
        }

        if line.is_empty() {
            continue;
        }

        let lower = line.to_lowercase();
        if skipping || VENDOR_MARKERS.iter().any(|marker| lower.contains(marker)) {
            skipping = true;
            continue;
        }

        if let Some(last) = lines.last_mut() {
            last.push(' ');
            last.push_str(line);
        }
    }

    lines
}

/// Parse ICS text into an event.
///
/// Starts from a fresh draft and overwrites every field the text provides,
/// including the uid. Unknown properties are ignored.
pub fn parse_event(content: &str) -> EventRecord {
    let mut event = EventRecord::new_draft();

    for line in unfold(content) {
        if line.matches(':').count() > 2 {
            warn!(line = %line, "Property has more than two colons, splitting on the first");
        }

        let Some((heading, value)) = line.split_once(':') else {
            continue;
        };

        if event.timezone.is_empty()
            && let Some(tz) = timezone_from_heading(heading)
        {
            event.timezone = tz;
        }

        let Some(field) = Field::for_heading(&heading.to_lowercase()) else {
            continue;
        };

        let value = value.to_string();
        match field {
            Field::Created => event.created = value,
            Field::End => event.end = value,
            Field::Start => event.start = value,
            Field::LastModified => event.last_modified = value,
            Field::Dtstamp => event.dtstamp = value,
            Field::Summary => event.summary = value,
            Field::Description => event.description = value,
            Field::Location => event.location = value,
            Field::Uid => event.uid = value,
            Field::Sequence => match value.trim().parse() {
                Ok(sequence) => event.sequence = sequence,
                Err(_) => warn!(value = %value, "Ignoring non-numeric SEQUENCE"),
            },
        }
    }

    event
}

/// Extract the TZID parameter from a property heading, e.g.
/// `DTSTART;TZID=Europe/Berlin` gives `Europe/Berlin`.
fn timezone_from_heading(heading: &str) -> Option<String> {
    const KEY: &str = "tzid=";

    let position = heading.to_ascii_lowercase().find(KEY)?;
    let rest = &heading[position + KEY.len()..];
    let tz = rest.split(';').next().unwrap_or(rest);

    (!tz.is_empty()).then(|| tz.to_string())
}

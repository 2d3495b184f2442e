/// Storage format for every timestamp field of an event.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Days added on both sides of a candidate when searching for existing events.
pub const DEFAULT_SEARCH_PADDING_DAYS: i64 = 1;

/// Length of the window cleared by a purge, starting at today's midnight.
pub const DEFAULT_PURGE_WINDOW_DAYS: i64 = 30;

/// Upper bound accepted for any configured window length, in days.
pub const MAX_WINDOW_DAYS: i64 = 3650;

/// Lowercase substrings marking provider-specific continuation lines
/// (iCloud emits these for structured locations and master-event metadata).
pub const VENDOR_MARKERS: [&str; 2] = ["x-apple", "x-master"];

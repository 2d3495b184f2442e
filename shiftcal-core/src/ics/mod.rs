//! ICS generation and parsing.
//!
//! Only the property subset this crate emits and the subset iCloud returns is
//! handled. Output is neither folded nor escaped, and input unfolding follows
//! the provider's quirks rather than RFC 5545.

mod generate;
mod parse;

pub use generate::generate_ics;
pub use parse::{parse_event, unfold};

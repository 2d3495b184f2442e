//! Core of shiftcal: keeps a remote calendar in step with scraped work shifts.
//!
//! - [`EventRecord`] is the normalized event, with [`ics`] converting it to and
//!   from the ICS subset iCloud accepts and returns.
//! - [`Calendar`] wraps one remote calendar (anything implementing
//!   [`remote::Collection`]) and reconciles candidates against it without
//!   creating duplicates.

pub mod calendar;
pub mod config;
pub mod constants;
pub mod date_range;
pub mod error;
pub mod event;
pub mod ics;
pub mod remote;
pub mod sync;

pub use calendar::{Calendar, calendar_names};
pub use config::SyncConfig;
pub use date_range::DateRange;
pub use error::{ShiftCalError, ShiftCalResult};
pub use event::{BackingRef, EventRecord};
pub use sync::SyncAction;

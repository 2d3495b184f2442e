//! Date range for searching events.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{ShiftCalError, ShiftCalResult};

/// A closed window of wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl DateRange {
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        DateRange { from, to }
    }

    /// `[start - padding_days, end + padding_days]`
    pub fn around(
        start: NaiveDateTime,
        end: NaiveDateTime,
        padding_days: i64,
    ) -> ShiftCalResult<Self> {
        let padding = days(padding_days)?;
        let from = start
            .checked_sub_signed(padding)
            .ok_or_else(|| out_of_range(padding_days))?;
        let to = end
            .checked_add_signed(padding)
            .ok_or_else(|| out_of_range(padding_days))?;

        Ok(DateRange { from, to })
    }

    /// `[day 00:00, day + days 00:00]`
    pub fn days_from(day: NaiveDate, length_days: i64) -> ShiftCalResult<Self> {
        let from = day.and_time(NaiveTime::MIN);
        let to = from
            .checked_add_signed(days(length_days)?)
            .ok_or_else(|| out_of_range(length_days))?;

        Ok(DateRange { from, to })
    }

    /// Whether an event spanning `[start, end]` touches this range.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start <= self.to && end >= self.from
    }
}

fn days(count: i64) -> ShiftCalResult<Duration> {
    Duration::try_days(count).ok_or_else(|| out_of_range(count))
}

fn out_of_range(count: i64) -> ShiftCalError {
    ShiftCalError::Config(format!("A window of {} days is out of range", count))
}

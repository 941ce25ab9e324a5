//! Calendar-date parsing and range expansion.
//!
//! Everything operates on plain UTC calendar dates. Bookings have no
//! time-of-day component, and offset arithmetic never touches a local
//! timezone, so "n days from today" is exact integer arithmetic.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};

/// Anchor year for month-day arithmetic. A leap year, so `02-29` is a valid
/// key.
const ANCHOR_YEAR: i32 = 2000;

/// Whether a range's end date is itself part of the range.
///
/// Check-in/checkout pairs are end-exclusive (the checkout night is not
/// occupied); blocked-date ranges are end-inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEnd {
    Exclusive,
    Inclusive,
}

/// Parse a `YYYY-MM-DD` string.
///
/// Valid iff the string has the fixed 4-2-2 digit shape and names a real
/// calendar date (`2025-02-30` fails). This is the authoritative validity
/// check for every date field in a request.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    let year: i32 = s[0..4].parse().ok()?;
    let month: u32 = s[5..7].parse().ok()?;
    let day: u32 = s[8..10].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse `M/D/YYYY` or `M/D/YY`. Two-digit years are 2000-based; years
/// outside 1..=9999 are rejected.
pub fn parse_slash_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('/');
    let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let field_ok = |p: &str| (1..=2).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_digit());
    if !field_ok(month) || !field_ok(day) || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = match year.len() {
        2 => 2000 + year.parse::<i32>().ok()?,
        4 => year.parse().ok()?,
        _ => return None,
    };
    if !(1..=9999).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

/// English weekday name, as callers match against `daysAvailableToHost`.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Same month and day one year later. Feb 29 rolls over to Mar 1, the way
/// day-based UTC arithmetic rolls it.
pub fn next_year(date: NaiveDate) -> NaiveDate {
    date.with_year(date.year() + 1)
        .or_else(|| NaiveDate::from_ymd_opt(date.year() + 1, 3, 1))
        .unwrap_or(NaiveDate::MAX)
}

/// Expand `[start, end)` or `[start, end]` into its individual dates, in
/// order.
///
/// `end < start` yields nothing. `start == end` yields nothing exclusive and
/// one date inclusive.
pub fn expand_range(start: NaiveDate, end: NaiveDate, end_bound: RangeEnd) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    loop {
        let done = match end_bound {
            RangeEnd::Exclusive => current >= end,
            RangeEnd::Inclusive => current > end,
        };
        if done {
            break;
        }
        dates.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    dates
}

/// A month-day key, independent of year. Orders and displays as `MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Build a key, validated against the (leap) anchor calendar: `02-29` is
    /// a key, `02-30` is not.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(ANCHOR_YEAR, month, day)?;
        Some(MonthDay { month, day })
    }

    /// The month-day of a concrete date.
    pub fn of(date: NaiveDate) -> Self {
        MonthDay {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    fn anchored(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(ANCHOR_YEAR, self.month, self.day)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Expand an inclusive month-day range into its set of keys, walking real
/// calendar days through the anchor year.
///
/// When `end < start` the range wraps across the year boundary:
/// `12-30 → 01-02` covers Dec 30, Dec 31, Jan 1, Jan 2.
pub fn expand_month_day_range(start: MonthDay, end: MonthDay) -> BTreeSet<MonthDay> {
    let mut keys = BTreeSet::new();
    let (Some(first), Some(end_anchor)) = (start.anchored(), end.anchored()) else {
        return keys;
    };
    let last = if end_anchor < first {
        next_year(end_anchor)
    } else {
        end_anchor
    };
    let mut current = first;
    while current <= last {
        keys.insert(MonthDay::of(current));
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    keys
}

//! The decision pipeline.
//!
//! Checks run in a fixed order and the first hit is the verdict: future
//! horizon, calendar-year cap, blocklist, same-day policy, advance notice,
//! then the per-candidate scan (weekday, own booking, any booking). The
//! order decides which of several simultaneously true violations gets
//! reported, so it is part of the caller contract.

use chrono::{Days, NaiveDate};
use serde_json::Value;

use crate::blocklist::CompiledBlocklist;
use crate::conflict;
use crate::dates;
use crate::error::{Rejection, RequestError};
use crate::policy::EnginePolicy;
use crate::request::BookingRequest;
use crate::verdict::Verdict;

/// Furthest a stay may end under the calendar-year cap, in years.
const MAX_BOOKING_YEARS: u32 = 1;

/// Evaluate a serialized request.
///
/// Undecodable text yields a fault verdict; nothing is thrown.
pub fn evaluate_json(input: &str, policy: &EnginePolicy, today: NaiveDate) -> Verdict {
    match serde_json::from_str::<Value>(input) {
        Ok(value) => evaluate_value(&value, policy, today),
        Err(_) => Verdict::fault(RequestError::InvalidJson),
    }
}

/// Evaluate an already decoded request.
///
/// `today` is the caller's reference date; the engine never reads a clock.
pub fn evaluate_value(input: &Value, policy: &EnginePolicy, today: NaiveDate) -> Verdict {
    let request = match BookingRequest::from_value(input, policy) {
        Ok(request) => request,
        Err(failure) => return failure.into(),
    };

    let blocklist = CompiledBlocklist::compile(
        &request.blocked_yearly,
        &request.blocked_no_yearly,
        request.space,
        policy,
    );
    let warning = blocklist.warning_detail();
    let warning = warning.as_deref();

    let conflicts = match conflict::build(
        &request.all_bookings,
        &request.user_booking,
        request.current_booking,
    ) {
        Ok(sets) => sets,
        Err(error) => return Verdict::fault(error),
    };

    // Horizon and cap bound the furthest night, so they run on arithmetic
    // alone; a stay that walks off the calendar is beyond any horizon.
    let last_night = match request.last_night() {
        Some(date) => date,
        None => return Verdict::reject(Rejection::BeyondHorizon(request.future_days), warning),
    };
    let horizon = today
        .checked_add_days(Days::new(request.future_days))
        .unwrap_or(NaiveDate::MAX);
    if last_night > horizon {
        return Verdict::reject(Rejection::BeyondHorizon(request.future_days), warning);
    }
    if policy.enforce_calendar_year_cap && last_night > dates::next_year(today) {
        return Verdict::reject(Rejection::BeyondCalendarYear(MAX_BOOKING_YEARS), warning);
    }

    // Blocklist scans every candidate; the earliest hit is reported.
    for date in request.stay_dates() {
        if blocklist.blocks(date) {
            return Verdict::reject(Rejection::DateBlocked(date), warning);
        }
    }

    let notice = (request.selected_date - today).num_days();
    if notice == 0 && !request.same_day_booking {
        return Verdict::reject(Rejection::SameDayNotAllowed, warning);
    }
    if notice < request.days_in_advance {
        return Verdict::reject(Rejection::InsufficientNotice(request.days_in_advance), warning);
    }

    for date in request.stay_dates() {
        let weekday = dates::weekday_name(date);
        if !request.days_available_to_host.iter().any(|day| day == weekday) {
            return Verdict::reject(Rejection::DayNotHosted(weekday), warning);
        }
        if conflicts.user.contains(&date) {
            return Verdict::reject(Rejection::OwnBookingConflict(date), warning);
        }
        if conflicts.all.contains(&date) {
            return Verdict::reject(Rejection::BookingConflict(date), warning);
        }
    }

    Verdict::accept(warning)
}

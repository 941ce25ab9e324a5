//! Conflict sets from existing reservations.
//!
//! Reservation lists flatten into per-date lookup sets. The user's own set
//! is checked before the global set so a clash with the requester's own
//! reservation is reported as theirs.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::RequestError;
use crate::request::{booking_window, StayWindow};

/// Dates already occupied, split by who holds them.
#[derive(Debug, Clone, Default)]
pub struct ConflictSets {
    /// Every reservation on the calendar.
    pub all: BTreeSet<NaiveDate>,
    /// The requesting user's own reservations.
    pub user: BTreeSet<NaiveDate>,
}

/// Expand both reservation lists into date sets, end-exclusive.
///
/// For a change request the current booking's own dates are removed from
/// both sets afterwards, so the user can rebook over their existing slot.
///
/// # Errors
///
/// [`RequestError::BookingRange`] / [`RequestError::UserBookingRange`] when
/// an entry in the respective list is not a pair of round-tripping dates.
pub fn build(
    all_bookings: &[Value],
    user_booking: &[Value],
    exclusion: Option<StayWindow>,
) -> Result<ConflictSets, RequestError> {
    let mut sets = ConflictSets::default();
    occupy(&mut sets.all, all_bookings, RequestError::BookingRange)?;
    occupy(&mut sets.user, user_booking, RequestError::UserBookingRange)?;

    if let Some(window) = exclusion {
        for date in window.occupied_dates() {
            sets.all.remove(&date);
            sets.user.remove(&date);
        }
    }

    Ok(sets)
}

fn occupy(
    set: &mut BTreeSet<NaiveDate>,
    bookings: &[Value],
    error: RequestError,
) -> Result<(), RequestError> {
    for entry in bookings {
        let window = booking_window(entry).ok_or_else(|| error.clone())?;
        set.extend(window.occupied_dates());
    }
    Ok(())
}

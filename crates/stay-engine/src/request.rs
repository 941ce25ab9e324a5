//! Field validation of the raw request record.
//!
//! Checks run in a fixed order and the first failure wins, so a given payload
//! always produces the same error. Wire field names and error strings are
//! part of the caller contract.

use chrono::{Days, NaiveDate};
use serde_json::{Map, Value};

use crate::dates::{self, RangeEnd};
use crate::error::{Rejection, RequestError, ValidationFailure};
use crate::policy::EnginePolicy;

/// One check-in/checkout pair. Checkout is exclusive: the checkout night is
/// not occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayWindow {
    pub check_in: NaiveDate,
    pub checkout: NaiveDate,
}

impl StayWindow {
    /// The occupied dates, check-in night through the night before checkout.
    pub fn occupied_dates(&self) -> Vec<NaiveDate> {
        dates::expand_range(self.check_in, self.checkout, RangeEnd::Exclusive)
    }
}

/// A validated booking request.
///
/// Blocklist entries stay raw here; they are compiled separately because
/// their problems are warnings, not validation failures.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub selected_date: NaiveDate,
    pub additional_nights: u64,
    pub is_change_request: bool,
    pub current_booking: Option<StayWindow>,
    pub all_bookings: Vec<Value>,
    pub user_booking: Vec<Value>,
    pub days_available_to_host: Vec<String>,
    pub future_days: u64,
    pub same_day_booking: bool,
    pub days_in_advance: i64,
    pub space: Option<i64>,
    pub blocked_yearly: Vec<Value>,
    pub blocked_no_yearly: Vec<Value>,
}

impl BookingRequest {
    /// Validate a decoded record.
    ///
    /// Check order: selectedDate, allowAdditionalNights (opt-in policies
    /// only), additionalNights, the opt-in gate, isChangeRequest,
    /// currentBooking (change requests only), allBookings, userBooking,
    /// daysAvailableToHost, futureDays, sameDayBooking, daysInAdvance,
    /// space (only when present).
    ///
    /// # Errors
    ///
    /// [`ValidationFailure::Fault`] with the field-specific message for the
    /// first invalid field; [`ValidationFailure::Reject`] when the opt-in
    /// gate turns the request down.
    pub fn from_value(value: &Value, policy: &EnginePolicy) -> Result<Self, ValidationFailure> {
        let Some(fields) = value.as_object() else {
            return Err(RequestError::NotAnObject.into());
        };

        let selected_date = fields
            .get("selectedDate")
            .and_then(Value::as_str)
            .and_then(dates::parse_date)
            .ok_or(RequestError::SelectedDate)?;

        // A missing opt-in flag means "not allowed"; a present non-boolean
        // is a malformed request.
        let allow_additional_nights = if policy.require_additional_nights_opt_in {
            match fields.get("allowAdditionalNights") {
                None => false,
                Some(Value::Bool(allow)) => *allow,
                Some(_) => return Err(RequestError::AllowAdditionalNights.into()),
            }
        } else {
            true
        };

        let min_nights = i64::from(!policy.require_additional_nights_opt_in);
        let additional_nights = fields
            .get("additionalNights")
            .and_then(as_integer)
            .filter(|&nights| nights >= min_nights)
            .ok_or_else(|| nights_error(policy))? as u64;

        if !allow_additional_nights && additional_nights > 0 {
            return Err(Rejection::AdditionalNightsNotAllowed.into());
        }

        let is_change_request = fields
            .get("isChangeRequest")
            .and_then(Value::as_bool)
            .ok_or(RequestError::IsChangeRequest)?;

        let current_booking = if is_change_request {
            let window = fields
                .get("currentBooking")
                .and_then(booking_window)
                .ok_or(RequestError::CurrentBooking)?;
            Some(window)
        } else {
            None
        };

        let all_bookings = array_field(fields, "allBookings").ok_or(RequestError::AllBookings)?;
        let user_booking = array_field(fields, "userBooking").ok_or(RequestError::UserBooking)?;

        let days_available_to_host = fields
            .get("daysAvailableToHost")
            .and_then(Value::as_array)
            .map(|days| {
                days.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .ok_or(RequestError::DaysAvailable)?;

        let future_days = fields
            .get("futureDays")
            .and_then(as_integer)
            .filter(|&days| days >= 0)
            .ok_or(RequestError::FutureDays)? as u64;

        let same_day_booking = fields
            .get("sameDayBooking")
            .and_then(Value::as_bool)
            .ok_or(RequestError::SameDayBooking)?;

        let days_in_advance = fields
            .get("daysInAdvance")
            .and_then(as_integer)
            .filter(|&days| days >= 0)
            .ok_or(RequestError::DaysInAdvance)?;

        let space = match fields.get("space") {
            None => None,
            Some(raw) => {
                let id = as_integer(raw)
                    .filter(|&id| id >= 1)
                    .ok_or(RequestError::Space)?;
                Some(id)
            }
        };

        let blocked_yearly = optional_array(fields, "blockedYearly");
        let blocked_no_yearly = optional_array(fields, "blockedNoYearly");

        Ok(BookingRequest {
            selected_date,
            additional_nights,
            is_change_request,
            current_booking,
            all_bookings,
            user_booking,
            days_available_to_host,
            future_days,
            same_day_booking,
            days_in_advance,
            space,
            blocked_yearly,
            blocked_no_yearly,
        })
    }

    /// The stay's occupied dates: `selected_date` through
    /// `selected_date + additional_nights`, one per night.
    pub fn stay_dates(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.selected_date;
        (0..=self.additional_nights)
            .map_while(move |offset| first.checked_add_days(Days::new(offset)))
    }

    /// The last occupied date, or `None` when it falls off the calendar.
    pub fn last_night(&self) -> Option<NaiveDate> {
        self.selected_date
            .checked_add_days(Days::new(self.additional_nights))
    }
}

/// A check-in/checkout object whose dates both round-trip.
pub(crate) fn booking_window(value: &Value) -> Option<StayWindow> {
    let pair = value.as_object()?;
    let check_in = pair
        .get("checkIn")
        .and_then(Value::as_str)
        .and_then(dates::parse_date)?;
    let checkout = pair
        .get("checkout")
        .and_then(Value::as_str)
        .and_then(dates::parse_date)?;
    Some(StayWindow { check_in, checkout })
}

/// An integer in the platform's sense: any JSON number with zero fractional
/// part. `2.0` counts; `"2"` and `true` do not.
pub(crate) fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn array_field(fields: &Map<String, Value>, key: &str) -> Option<Vec<Value>> {
    fields.get(key).and_then(Value::as_array).cloned()
}

fn optional_array(fields: &Map<String, Value>, key: &str) -> Vec<Value> {
    array_field(fields, key).unwrap_or_default()
}

fn nights_error(policy: &EnginePolicy) -> ValidationFailure {
    if policy.require_additional_nights_opt_in {
        RequestError::AdditionalNightsNonNegative.into()
    } else {
        RequestError::AdditionalNightsPositive.into()
    }
}

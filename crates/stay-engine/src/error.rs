//! Error types for request evaluation.
//!
//! Two disjoint classes: [`RequestError`] covers malformed input and surfaces
//! through a verdict's `errorMessage`; [`Rejection`] covers business rules
//! and surfaces through `message`. The display strings are a wire contract
//! with existing callers; changing one breaks their pattern matching.

use chrono::NaiveDate;
use thiserror::Error;

/// Malformed-input faults. Never a normal outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid JSON input format")]
    InvalidJson,

    #[error("Input must be a JSON string or an object")]
    NotAnObject,

    #[error("Invalid selected date format. Expected YYYY-MM-DD")]
    SelectedDate,

    #[error("Additional nights must be a positive integer")]
    AdditionalNightsPositive,

    #[error("Additional nights must be a non-negative integer")]
    AdditionalNightsNonNegative,

    #[error("allowAdditionalNights must be a boolean")]
    AllowAdditionalNights,

    #[error("isChangeRequest must be a boolean")]
    IsChangeRequest,

    #[error("currentBooking must be provided for change requests and must have valid checkIn and checkout dates in YYYY-MM-DD format")]
    CurrentBooking,

    #[error("allBookings must be an array of booking objects")]
    AllBookings,

    #[error("userBooking must be an array of booking objects")]
    UserBooking,

    #[error("Days available to host must be an array of day names")]
    DaysAvailable,

    #[error("Future days must be a non-negative integer")]
    FutureDays,

    #[error("Same day booking must be a boolean")]
    SameDayBooking,

    #[error("Days in advance must be a non-negative integer")]
    DaysInAdvance,

    #[error("space must be a positive integer or omitted")]
    Space,

    #[error("Invalid booking range format. Each booking must have checkIn and checkout dates in YYYY-MM-DD format")]
    BookingRange,

    #[error("Invalid user booking range format. Each booking must have checkIn and checkout dates in YYYY-MM-DD format")]
    UserBookingRange,
}

/// Business-rule rejections. Normal, expected outcomes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Cannot book more than {0} days in the future")]
    BeyondHorizon(u64),

    #[error("Cannot book more than {0} year(s) in the future")]
    BeyondCalendarYear(u32),

    #[error("Date blocked: {0}")]
    DateBlocked(NaiveDate),

    #[error("Same-day bookings are not allowed")]
    SameDayNotAllowed,

    #[error("Bookings must be made at least {0} days in advance")]
    InsufficientNotice(i64),

    #[error("Hosting not available on {0}")]
    DayNotHosted(&'static str),

    #[error("You already have a booking on {0}")]
    OwnBookingConflict(NaiveDate),

    #[error("Booking conflict: {0} is already booked")]
    BookingConflict(NaiveDate),

    #[error("Additional nights are not allowed")]
    AdditionalNightsNotAllowed,
}

/// A halt raised while validating, before the pipeline runs.
///
/// The additional-nights opt-in gate is the one business rule evaluated
/// mid-validation, so validation can stop with either class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    Fault(RequestError),
    Reject(Rejection),
}

impl From<RequestError> for ValidationFailure {
    fn from(error: RequestError) -> Self {
        ValidationFailure::Fault(error)
    }
}

impl From<Rejection> for ValidationFailure {
    fn from(rejection: Rejection) -> Self {
        ValidationFailure::Reject(rejection)
    }
}

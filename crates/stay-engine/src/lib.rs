//! # stay-engine
//!
//! Deterministic booking-eligibility checks for host calendars.
//!
//! Given a proposed stay (a check-in date plus additional nights), the
//! host's availability rules, and a snapshot of existing reservations, the
//! engine produces an accept/reject verdict with a single, deterministically
//! chosen reason. It is a pure function: no clock access, no I/O, no state
//! between calls.
//!
//! ## Modules
//!
//! - [`engine`] — the ordered decision pipeline and entry points
//! - [`request`] — field validation of the raw record
//! - [`dates`] — calendar-date parsing and range expansion
//! - [`blocklist`] — blocked-date compilation (recurring + one-time)
//! - [`conflict`] — reservation conflict sets
//! - [`resolver`] — authoring-side blocked-date lists
//! - [`policy`] — per-deployment check toggles
//! - [`verdict`] — the `{status, message, errorMessage}` output record
//! - [`error`] — error types

pub mod blocklist;
pub mod conflict;
pub mod dates;
pub mod engine;
pub mod error;
pub mod policy;
pub mod request;
pub mod resolver;
pub mod verdict;

pub use engine::{evaluate_json, evaluate_value};
pub use error::{Rejection, RequestError};
pub use policy::EnginePolicy;
pub use request::BookingRequest;
pub use resolver::{resolve_blocked_dates, BlockedDateLists, ResolverRequest, SpaceFilter};
pub use verdict::Verdict;

//! WASM bindings for stay-engine.
//!
//! Exposes booking evaluation and blocked-date resolution to the browser
//! runtime via `wasm-bindgen`. All payloads cross the boundary as JSON
//! strings, and every export returns a result document instead of throwing:
//! the embedding widget renders `message`/`errorMessage` fields, it does not
//! catch exceptions.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p stay-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/stay-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/stay_engine_wasm.wasm
//! ```

use chrono::{NaiveDate, Utc};
use stay_engine::{dates, evaluate_json, EnginePolicy, ResolverRequest, Verdict};
use wasm_bindgen::prelude::*;

/// Fallback documents, shaped like the regular outputs so the widget can
/// always bind its fields.
const FAULT_VERDICT_JSON: &str =
    r#"{"status":false,"message":"","errorMessage":"Invalid JSON input format"}"#;
const RESOLVE_FAILURE_JSON: &str =
    r#"{"datesYearly":[],"datesNotYearly":[],"errorMessage":"Invalid JSON input format"}"#;
const EMPTY_LISTS_JSON: &str = r#"{"datesYearly":[],"datesNotYearly":[]}"#;

fn verdict_json(verdict: &Verdict) -> String {
    // Three plain fields; serialization cannot fail, but the boundary still
    // never throws.
    serde_json::to_string(verdict).unwrap_or_else(|_| FAULT_VERDICT_JSON.to_owned())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Evaluate a booking request against today's date.
///
/// `input` is the request JSON. Runs the restricted policy, the one deployed
/// to untrusted callers. Returns the verdict as a JSON string; malformed
/// input yields a fault verdict rather than an exception.
#[wasm_bindgen(js_name = "evaluateBooking")]
pub fn evaluate_booking(input: &str) -> String {
    let today = Utc::now().date_naive();
    verdict_json(&evaluate_json(input, &EnginePolicy::restricted(), today))
}

/// Evaluate a booking request against a caller-supplied reference date.
///
/// `today` must be `YYYY-MM-DD`. Unlike a malformed request, a malformed
/// reference date is a caller bug and is reported as an error.
#[wasm_bindgen(js_name = "evaluateBookingAt")]
pub fn evaluate_booking_at(input: &str, today: &str) -> Result<String, JsValue> {
    let today: NaiveDate = dates::parse_date(today)
        .ok_or_else(|| JsValue::from_str(&format!("Invalid reference date '{today}'")))?;
    Ok(verdict_json(&evaluate_json(
        input,
        &EnginePolicy::restricted(),
        today,
    )))
}

/// Resolve raw block declarations into the two calendar display lists.
///
/// `input` is the resolver envelope: `blocked` declarations plus the space
/// scope (`selectSpace`, `space`, or `spaces`). Returns
/// `{datesYearly, datesNotYearly}` as a JSON string; an unreadable envelope
/// yields empty lists plus an `errorMessage`.
#[wasm_bindgen(js_name = "resolveBlockedDates")]
pub fn resolve_blocked_dates(input: &str) -> String {
    let Ok(request) = serde_json::from_str::<ResolverRequest>(input) else {
        return RESOLVE_FAILURE_JSON.to_owned();
    };
    serde_json::to_string(&request.resolve()).unwrap_or_else(|_| EMPTY_LISTS_JSON.to_owned())
}

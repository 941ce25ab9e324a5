//! Resolver tests: per-date aggregation across declarations, the three
//! space-filter modes, recurrence flags, and display-list formatting.

use serde_json::{json, Value};
use stay_engine::{resolve_blocked_dates, BlockedDateLists, ResolverRequest, SpaceFilter};

fn lists(yearly: &[&str], not_yearly: &[&str]) -> BlockedDateLists {
    BlockedDateLists {
        dates_yearly: yearly.iter().map(|s| (*s).to_owned()).collect(),
        dates_not_yearly: not_yearly.iter().map(|s| (*s).to_owned()).collect(),
    }
}

fn resolve_envelope(input: Value) -> BlockedDateLists {
    let request: ResolverRequest =
        serde_json::from_value(input).expect("envelope should deserialize");
    request.resolve()
}

fn host_calendar() -> Value {
    json!([
        { "yearly": false, "space": [], "start date": "12/01/2025", "end date": "12/05/2025" },
        { "yearly": false, "space": [], "start date": "12/21/2025", "end date": "12/23/2025" },
        { "yearly": true, "space": [1], "start date": "11/20/2025", "end date": "11/21/2025" },
        { "yearly": true, "space": [1], "start date": "12/10/2025", "end date": "12/11/2025" }
    ])
}

// ---------------------------------------------------------------------------
// Envelope scope modes
// ---------------------------------------------------------------------------

#[test]
fn no_selection_means_any_of_the_hosts_spaces() {
    let result = resolve_envelope(json!({
        "spaces": [1, 2],
        "blocked": host_calendar()
    }));
    assert_eq!(
        result,
        lists(
            &["11/20", "11/21", "12/10", "12/11"],
            &[
                "12/01/25", "12/02/25", "12/03/25", "12/04/25", "12/05/25",
                "12/21/25", "12/22/25", "12/23/25"
            ]
        )
    );
}

#[test]
fn selecting_a_space_narrows_to_its_blocks() {
    let result = resolve_envelope(json!({
        "spaces": [1, 2],
        "selectSpace": 1,
        "blocked": host_calendar()
    }));
    assert_eq!(
        result,
        lists(
            &["11/20", "11/21", "12/10", "12/11"],
            &[
                "12/01/25", "12/02/25", "12/03/25", "12/04/25", "12/05/25",
                "12/21/25", "12/22/25", "12/23/25"
            ]
        )
    );
}

#[test]
fn selecting_an_unscoped_space_keeps_only_global_blocks() {
    let result = resolve_envelope(json!({
        "spaces": [1, 2],
        "selectSpace": 2,
        "blocked": host_calendar()
    }));
    assert_eq!(
        result,
        lists(
            &[],
            &[
                "12/01/25", "12/02/25", "12/03/25", "12/04/25", "12/05/25",
                "12/21/25", "12/22/25", "12/23/25"
            ]
        )
    );
}

#[test]
fn space_list_requires_every_space_blocked() {
    let result = resolve_envelope(json!({
        "space": [1, 2],
        "blocked": [
            { "yearly": true, "start date": "10/01/2024", "end date": "10/02/2024" },
            { "yearly": true, "space": ["1"], "start date": "10/03/2025", "end date": "10/04/2025" },
            { "yearly": true, "space": ["2"], "start date": "10/03/2025", "end date": "10/04/2025" },
            { "yearly": false, "space": ["1"], "start date": "10/11/2025", "end date": "10/12/2025" },
            { "yearly": false, "space": ["2"], "start date": "10/11/2025", "end date": "10/12/2025" },
            { "yearly": true, "space": ["1"], "start date": "10/21/2024", "end date": "10/22/2024" }
        ]
    }));
    assert_eq!(
        result,
        lists(
            &["10/01", "10/02", "10/03", "10/04"],
            &["10/11/25", "10/12/25"]
        )
    );
}

#[test]
fn explicit_selection_outranks_the_other_scopes() {
    let envelope = json!({
        "spaces": [1, 2],
        "space": [1, 2],
        "selectSpace": 2,
        "blocked": []
    });
    let request: ResolverRequest = serde_json::from_value(envelope).expect("envelope");
    assert_eq!(request.filter(), SpaceFilter::Unit("2".to_owned()));
}

#[test]
fn zero_and_empty_query_keys_are_dropped() {
    let envelope = json!({ "spaces": [0, 1, ""], "blocked": [] });
    let request: ResolverRequest = serde_json::from_value(envelope).expect("envelope");
    assert_eq!(request.filter(), SpaceFilter::AnyOf(vec!["1".to_owned()]));
}

// ---------------------------------------------------------------------------
// Recurrence flags
// ---------------------------------------------------------------------------

#[test]
fn yearly_defaults_to_true() {
    let result = resolve_envelope(json!({
        "spaces": [1],
        "blocked": [{ "start date": "03/05/2025", "end date": "03/05/2025" }]
    }));
    assert_eq!(result, lists(&["03/05"], &[]));
}

#[test]
fn only_no_makes_a_text_flag_one_time() {
    let result = resolve_envelope(json!({
        "spaces": [1],
        "blocked": [
            { "yearly": "no", "start date": "03/05/2025", "end date": "03/05/2025" },
            { "yearly": "yes", "start date": "04/06/2025", "end date": "04/06/2025" }
        ]
    }));
    assert_eq!(result, lists(&["04/06"], &["03/05/25"]));
}

#[test]
fn one_time_declaration_wins_on_a_shared_date() {
    let result = resolve_envelope(json!({
        "spaces": [1],
        "blocked": [
            { "yearly": true, "start date": "03/05/2025", "end date": "03/05/2025" },
            { "yearly": false, "start date": "03/05/2025", "end date": "03/05/2025" }
        ]
    }));
    assert_eq!(result, lists(&[], &["03/05/25"]));
}

#[test]
fn recurrence_is_aggregated_across_scopes() {
    // A one-time block for another space still turns the shared date
    // one-time for everyone; the stored calendar keeps one flag per date.
    let result = resolve_envelope(json!({
        "selectSpace": 1,
        "blocked": [
            { "yearly": true, "start date": "03/05/2025", "end date": "03/05/2025" },
            { "yearly": false, "space": ["9"], "start date": "03/05/2025", "end date": "03/05/2025" }
        ]
    }));
    assert_eq!(result, lists(&[], &["03/05/25"]));
}

// ---------------------------------------------------------------------------
// Robustness
// ---------------------------------------------------------------------------

#[test]
fn unreadable_declarations_contribute_nothing() {
    let result = resolve_envelope(json!({
        "spaces": [1],
        "blocked": [
            { "yearly": true, "end date": "03/05/2025" },
            { "yearly": true, "start date": "13/45/2025", "end date": "03/05/2025" },
            "03/05/2025",
            null,
            { "start date": "04/06/2025", "end date": "04/06/2025" }
        ]
    }));
    assert_eq!(result, lists(&["04/06"], &[]));
}

#[test]
fn two_digit_and_four_digit_years_agree() {
    let result = resolve_envelope(json!({
        "spaces": [1],
        "blocked": [
            { "yearly": false, "start date": "12/01/25", "end date": "12/01/25" },
            { "yearly": false, "start date": "12/01/2025", "end date": "12/01/2025" }
        ]
    }));
    assert_eq!(result, lists(&[], &["12/01/25"]));
}

#[test]
fn duplicate_recurring_declarations_dedupe() {
    let result = resolve_envelope(json!({
        "spaces": [1],
        "blocked": [
            { "yearly": true, "start date": "11/20/2025", "end date": "11/20/2025" },
            { "yearly": true, "start date": "11/20/2026", "end date": "11/20/2026" }
        ]
    }));
    assert_eq!(result, lists(&["11/20"], &[]));
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[test]
fn recurring_dates_sort_by_month_day() {
    let result = resolve_envelope(json!({
        "spaces": [1],
        "blocked": [
            { "yearly": true, "start date": "11/20/2026", "end date": "11/20/2026" },
            { "yearly": true, "start date": "01/05/2024", "end date": "01/05/2024" }
        ]
    }));
    assert_eq!(result, lists(&["01/05", "11/20"], &[]));
}

#[test]
fn one_time_dates_sort_chronologically_across_years() {
    let result = resolve_envelope(json!({
        "spaces": [1],
        "blocked": [
            { "yearly": false, "start date": "01/02/2026", "end date": "01/02/2026" },
            { "yearly": false, "start date": "12/30/2025", "end date": "12/30/2025" }
        ]
    }));
    assert_eq!(result, lists(&[], &["12/30/25", "01/02/26"]));
}

// ---------------------------------------------------------------------------
// Direct filter behavior
// ---------------------------------------------------------------------------

#[test]
fn global_blocks_reach_every_filter() {
    let blocked = [json!({ "start date": "05/01/2025", "end date": "05/01/2025" })];
    let filter = SpaceFilter::Unit("unlisted".to_owned());
    assert_eq!(
        resolve_blocked_dates(&blocked, &filter),
        lists(&["05/01"], &[])
    );
}

#[test]
fn empty_all_of_filter_selects_scoped_blocks() {
    let blocked =
        [json!({ "space": ["3"], "start date": "05/01/2025", "end date": "05/01/2025" })];
    assert_eq!(
        resolve_blocked_dates(&blocked, &SpaceFilter::AllOf(Vec::new())),
        lists(&["05/01"], &[])
    );
    assert_eq!(
        resolve_blocked_dates(&blocked, &SpaceFilter::AnyOf(Vec::new())),
        lists(&[], &[])
    );
}

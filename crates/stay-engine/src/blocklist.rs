//! Blocked-date compilation.
//!
//! Hosts declare blocked ranges in two lists: `blockedYearly` (recurring
//! every year) and `blockedNoYearly` (one-time). An entry is either a legacy
//! compact string or a `{start, end, spaces?}` object scoped to particular
//! bookable spaces. Invalid entries never fail an evaluation: they are
//! collected and surfaced as a warning while the valid subset still applies,
//! so one bad entry cannot silently unblock a calendar.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::dates::{self, MonthDay, RangeEnd};
use crate::policy::EnginePolicy;
use crate::request::as_integer;

/// Warning message attached to a verdict when entries were ignored.
pub const IGNORED_WARNING: &str = "Some blocked dates were ignored due to invalid format";

/// Which spaces a blocklist entry applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceScope {
    /// No usable `spaces` list: the entry blocks every space.
    Global,
    /// The entry blocks only requests whose `space` is listed.
    Only(Vec<i64>),
}

impl SpaceScope {
    /// Missing, non-array, or empty `spaces` all mean global.
    fn decode(spaces: Option<&Value>) -> Self {
        match spaces.and_then(Value::as_array) {
            Some(list) if !list.is_empty() => {
                SpaceScope::Only(list.iter().filter_map(as_integer).collect())
            }
            _ => SpaceScope::Global,
        }
    }

    /// Whether an entry with this scope applies to the requesting space.
    pub fn applies_to(&self, space: Option<i64>) -> bool {
        match self {
            SpaceScope::Global => true,
            SpaceScope::Only(list) => space.is_some_and(|id| list.contains(&id)),
        }
    }
}

/// One raw blocklist entry, shape-sniffed once at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockEntry {
    /// Legacy compact string form.
    Legacy(String),
    /// `{start, end, spaces?}` object form. `raw` keeps the original
    /// rendering for the warning list.
    Range {
        start: String,
        end: String,
        scope: SpaceScope,
        raw: String,
    },
    /// Neither shape.
    Malformed(String),
}

impl BlockEntry {
    /// Classify one raw entry. An object counts as a range when both bounds
    /// are present (non-null, non-empty); whether they parse is judged later
    /// so that out-of-scope entries can be skipped without a warning.
    pub fn classify(value: &Value) -> Self {
        if let Some(text) = value.as_str() {
            return BlockEntry::Legacy(text.to_owned());
        }
        if let Some(entry) = value.as_object() {
            if let (Some(start), Some(end)) = (field_text(entry, "start"), field_text(entry, "end"))
            {
                return BlockEntry::Range {
                    start,
                    end,
                    scope: SpaceScope::decode(entry.get("spaces")),
                    raw: render(value),
                };
            }
        }
        BlockEntry::Malformed(render(value))
    }
}

/// Blocked dates compiled into lookup sets.
#[derive(Debug, Clone, Default)]
pub struct CompiledBlocklist {
    /// Recurring blocks, keyed by month-day.
    pub day_of_year: BTreeSet<MonthDay>,
    /// One-time blocks, keyed by concrete date.
    pub absolute: BTreeSet<NaiveDate>,
    /// Raw entries that failed to parse, kept per source list.
    pub ignored: IgnoredEntries,
}

impl CompiledBlocklist {
    /// Compile both raw lists for one request.
    pub fn compile(
        yearly: &[Value],
        dated: &[Value],
        space: Option<i64>,
        policy: &EnginePolicy,
    ) -> Self {
        let mut compiled = CompiledBlocklist::default();
        for value in yearly {
            compiled.add_yearly(BlockEntry::classify(value), space, policy);
        }
        for value in dated {
            compiled.add_dated(BlockEntry::classify(value), space, policy);
        }
        compiled
    }

    /// Whether a candidate date is blocked, one-time or recurring.
    pub fn blocks(&self, date: NaiveDate) -> bool {
        self.absolute.contains(&date) || self.day_of_year.contains(&MonthDay::of(date))
    }

    /// Warning detail when any entries were ignored.
    pub fn warning_detail(&self) -> Option<String> {
        (!self.ignored.is_empty()).then(|| self.ignored.detail())
    }

    fn add_yearly(&mut self, entry: BlockEntry, space: Option<i64>, policy: &EnginePolicy) {
        match entry {
            BlockEntry::Legacy(text) => {
                let key = policy
                    .accept_legacy_blocklist_strings
                    .then(|| parse_compact_month_day(&text))
                    .flatten();
                match key {
                    Some(key) => {
                        self.day_of_year.insert(key);
                    }
                    None => self.ignored.yearly.push(text),
                }
            }
            BlockEntry::Range {
                start,
                end,
                scope,
                raw,
            } => {
                if !scope.applies_to(space) {
                    return;
                }
                match (dates::parse_date(&start), dates::parse_date(&end)) {
                    (Some(start), Some(end)) => {
                        self.day_of_year.extend(dates::expand_month_day_range(
                            MonthDay::of(start),
                            MonthDay::of(end),
                        ));
                    }
                    _ => self.ignored.yearly.push(raw),
                }
            }
            BlockEntry::Malformed(raw) => self.ignored.yearly.push(raw),
        }
    }

    fn add_dated(&mut self, entry: BlockEntry, space: Option<i64>, policy: &EnginePolicy) {
        match entry {
            BlockEntry::Legacy(text) => {
                let date = policy
                    .accept_legacy_blocklist_strings
                    .then(|| parse_legacy_date(&text))
                    .flatten();
                match date {
                    Some(date) => {
                        self.absolute.insert(date);
                    }
                    None => self.ignored.dated.push(text),
                }
            }
            BlockEntry::Range {
                start,
                end,
                scope,
                raw,
            } => {
                if !scope.applies_to(space) {
                    return;
                }
                match (dates::parse_date(&start), dates::parse_date(&end)) {
                    (Some(start), Some(end)) => {
                        self.absolute
                            .extend(dates::expand_range(start, end, RangeEnd::Inclusive));
                    }
                    _ => self.ignored.dated.push(raw),
                }
            }
            BlockEntry::Malformed(raw) => self.ignored.dated.push(raw),
        }
    }
}

/// Raw entries that were ignored, per source list.
#[derive(Debug, Clone, Default)]
pub struct IgnoredEntries {
    pub yearly: Vec<String>,
    pub dated: Vec<String>,
}

impl IgnoredEntries {
    pub fn is_empty(&self) -> bool {
        self.yearly.is_empty() && self.dated.is_empty()
    }

    /// Human-readable accounting, one segment per list with invalid entries.
    pub fn detail(&self) -> String {
        let mut segments = Vec::new();
        if !self.yearly.is_empty() {
            segments.push(format!(
                "Ignored invalid blockedYearly entries: [{}]",
                quoted(&self.yearly)
            ));
        }
        if !self.dated.is_empty() {
            segments.push(format!(
                "Ignored invalid blockedNoYearly entries: [{}]",
                quoted(&self.dated)
            ));
        }
        segments.join(" ")
    }
}

/// Legacy recurring entry: `M/D` or `M-D`, validated against the real
/// calendar, so `2-30` is invalid.
fn parse_compact_month_day(text: &str) -> Option<MonthDay> {
    let text = text.trim();
    let sep = if text.contains('/') { '/' } else { '-' };
    let (month, day) = text.split_once(sep)?;
    let field_ok = |p: &str| (1..=2).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_digit());
    if !field_ok(month) || !field_ok(day) {
        return None;
    }
    MonthDay::new(month.parse().ok()?, day.parse().ok()?)
}

/// Legacy one-time entry: `YYYY-MM-DD`, or `M/D/YY` | `M/D/YYYY`.
fn parse_legacy_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    dates::parse_date(text).or_else(|| dates::parse_slash_date(text))
}

/// A field counts as present when it is non-null and not the empty string.
/// Non-string scalars keep their JSON rendering so the date check can judge
/// them.
fn field_text(entry: &Map<String, Value>, key: &str) -> Option<String> {
    match entry.get(key)? {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(render(other)),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn quoted(entries: &[String]) -> String {
    entries
        .iter()
        .map(|entry| format!("'{entry}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

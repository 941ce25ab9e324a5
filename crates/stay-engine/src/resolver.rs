//! Authoring-side blocked-date lists.
//!
//! The checking engine consumes blocklists one request at a time; hosts also
//! need the full picture while editing a calendar. This resolver takes the
//! raw block declarations and a space scope and renders the two display
//! lists the platform binds to its calendar widget: recurring dates as
//! `MM/DD` sorted by month-day, one-time dates as `MM/DD/YY` sorted
//! chronologically.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dates::{self, MonthDay, RangeEnd};

/// One raw block declaration as the platform stores it.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockDeclaration {
    #[serde(rename = "start date")]
    pub start: String,
    #[serde(rename = "end date")]
    pub end: String,
    /// Space keys this block is limited to; empty means every space.
    #[serde(default, rename = "space")]
    pub spaces: Vec<Value>,
    /// Blocks recur yearly unless declared otherwise.
    #[serde(default)]
    pub yearly: YearlyFlag,
}

/// The stored `yearly` flag, which predates schema enforcement: only an
/// explicit `false` or `"no"` makes a block one-time.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum YearlyFlag {
    Flag(bool),
    Text(String),
    Other(Value),
}

impl YearlyFlag {
    fn is_yearly(&self) -> bool {
        match self {
            YearlyFlag::Flag(flag) => *flag,
            YearlyFlag::Text(text) => text != "no",
            YearlyFlag::Other(_) => true,
        }
    }
}

impl Default for YearlyFlag {
    fn default() -> Self {
        YearlyFlag::Flag(true)
    }
}

/// Which spaces the caller is asking about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceFilter {
    /// Dates blocked for one particular space.
    Unit(String),
    /// Dates blocked for at least one of these spaces.
    AnyOf(Vec<String>),
    /// Dates blocked for every one of these spaces at once. Vacuously true
    /// when empty.
    AllOf(Vec<String>),
}

impl SpaceFilter {
    fn selects(&self, day: &DayBlocks) -> bool {
        if day.global {
            return true;
        }
        match self {
            SpaceFilter::Unit(key) => day.spaces.contains(key),
            SpaceFilter::AnyOf(keys) => keys.iter().any(|key| day.spaces.contains(key)),
            SpaceFilter::AllOf(keys) => keys.iter().all(|key| day.spaces.contains(key)),
        }
    }
}

/// The two display lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedDateLists {
    /// `MM/DD`, recurring, sorted by month-day.
    pub dates_yearly: Vec<String>,
    /// `MM/DD/YY`, one-time, sorted chronologically.
    pub dates_not_yearly: Vec<String>,
}

/// Per-date aggregation across every declaration.
#[derive(Debug)]
struct DayBlocks {
    spaces: BTreeSet<String>,
    global: bool,
    yearly: bool,
}

impl Default for DayBlocks {
    fn default() -> Self {
        DayBlocks {
            spaces: BTreeSet::new(),
            global: false,
            yearly: true,
        }
    }
}

/// Resolve raw declarations into the display lists.
///
/// Declarations aggregate per concrete date first: space keys union, a
/// declaration without keys marks the date globally blocked, and any
/// one-time declaration makes the date one-time. The filter then selects
/// dates from the aggregate. Declarations that fail to decode, or whose
/// dates do not parse, contribute nothing.
pub fn resolve_blocked_dates(declarations: &[Value], filter: &SpaceFilter) -> BlockedDateLists {
    let mut days: BTreeMap<NaiveDate, DayBlocks> = BTreeMap::new();

    for raw in declarations {
        let Ok(block) = serde_json::from_value::<BlockDeclaration>(raw.clone()) else {
            continue;
        };
        let (Some(start), Some(end)) = (
            dates::parse_slash_date(block.start.trim()),
            dates::parse_slash_date(block.end.trim()),
        ) else {
            continue;
        };
        let keys: BTreeSet<String> = block.spaces.iter().filter_map(space_key).collect();
        let yearly = block.yearly.is_yearly();
        for date in dates::expand_range(start, end, RangeEnd::Inclusive) {
            let day = days.entry(date).or_default();
            if keys.is_empty() {
                day.global = true;
            } else {
                day.spaces.extend(keys.iter().cloned());
            }
            if !yearly {
                day.yearly = false;
            }
        }
    }

    let mut recurring = BTreeSet::new();
    let mut one_time = BTreeSet::new();
    for (date, day) in &days {
        if !filter.selects(day) {
            continue;
        }
        if day.yearly {
            recurring.insert(MonthDay::of(*date));
        } else {
            one_time.insert(*date);
        }
    }

    BlockedDateLists {
        dates_yearly: recurring
            .iter()
            .map(|key| format!("{:02}/{:02}", key.month(), key.day()))
            .collect(),
        dates_not_yearly: one_time
            .iter()
            .map(|date| format!("{:02}/{:02}/{:02}", date.month(), date.day(), date.year() % 100))
            .collect(),
    }
}

/// Space keys are stored loosely (numbers or strings); normalize to text.
/// Anything else cannot name a space.
pub fn space_key(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Query-side key list; the platform drops empty and zero entries here.
pub fn query_space_keys(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(space_key)
        .filter(|key| key != "0")
        .collect()
}

/// The resolver's wire envelope, as both platform surfaces send it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolverRequest {
    #[serde(default)]
    pub blocked: Vec<Value>,
    /// The host's spaces (browser surface).
    #[serde(default)]
    pub spaces: Vec<Value>,
    /// Single space selection (browser surface).
    #[serde(default, rename = "selectSpace")]
    pub select_space: Option<Value>,
    /// Space list one request covers (server surface, every-space rule).
    #[serde(default, rename = "space")]
    pub space: Vec<Value>,
}

impl ResolverRequest {
    /// Scope implied by the envelope: an explicit selection wins, then the
    /// server-style `space` list, then the host's spaces.
    pub fn filter(&self) -> SpaceFilter {
        if let Some(key) = self.select_space.as_ref().and_then(space_key) {
            return SpaceFilter::Unit(key);
        }
        if !self.space.is_empty() {
            return SpaceFilter::AllOf(query_space_keys(&self.space));
        }
        SpaceFilter::AnyOf(query_space_keys(&self.spaces))
    }

    pub fn resolve(&self) -> BlockedDateLists {
        resolve_blocked_dates(&self.blocked, &self.filter())
    }
}

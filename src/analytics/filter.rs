//! Month and weekday restriction of trip records

use crate::{filter_error, Result, TripRecord};
use log::debug;
use serde::Serialize;

pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

pub const WEEKDAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const ALL: &str = "all";

/// Month and weekday selection; `None` selects every value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FilterSpec {
    month: Option<u32>,
    weekday: Option<u32>,
}

impl FilterSpec {
    /// Build a filter, rejecting months outside 1..=12 and weekdays outside 0..=6
    pub fn new(month: Option<u32>, weekday: Option<u32>) -> Result<Self> {
        if let Some(m) = month {
            if !(1..=12).contains(&m) {
                return Err(filter_error("month", m));
            }
        }
        if let Some(d) = weekday {
            if d > 6 {
                return Err(filter_error("weekday", d));
            }
        }
        Ok(Self { month, weekday })
    }

    /// Filter that keeps every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn weekday(&self) -> Option<u32> {
        self.weekday
    }

    pub fn matches(&self, record: &TripRecord) -> bool {
        self.month.map_or(true, |m| record.month() == m)
            && self.weekday.map_or(true, |d| record.weekday() == d)
    }
}

/// Keep the records matching `spec`, preserving their order
pub fn filter(records: &[TripRecord], spec: &FilterSpec) -> Vec<TripRecord> {
    let filtered: Vec<TripRecord> = records
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect();

    debug!(
        "Filter month={:?} weekday={:?} kept {} of {} records",
        spec.month,
        spec.weekday,
        filtered.len(),
        records.len()
    );

    filtered
}

/// Parse a month name, numeral or `all`
pub fn parse_month(input: &str) -> Result<Option<u32>> {
    parse_selection(input, "month", &MONTH_NAMES, 1)
}

/// Parse a weekday name, numeral (Monday = 0) or `all`
pub fn parse_weekday(input: &str) -> Result<Option<u32>> {
    parse_selection(input, "weekday", &WEEKDAY_NAMES, 0)
}

fn parse_selection(input: &str, field: &str, names: &[&str], first: u32) -> Result<Option<u32>> {
    let value = input.trim().to_lowercase();
    if value == ALL {
        return Ok(None);
    }

    if let Some(index) = names.iter().position(|name| *name == value) {
        return Ok(Some(index as u32 + first));
    }

    match value.parse::<u32>() {
        Ok(n) if n >= first && n < names.len() as u32 + first => Ok(Some(n)),
        _ => Err(filter_error(field, input.trim())),
    }
}

/// Lowercase English name for a month number
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index as usize))
        .copied()
}

/// Lowercase English name for a weekday number
pub fn weekday_name(weekday: u32) -> Option<&'static str> {
    WEEKDAY_NAMES.get(weekday as usize).copied()
}

//! Structured statistics handed to the presentation layer

use crate::FilterSpec;
use serde::Serialize;
use std::fmt;

/// Outcome of a single statistic group or sub-result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Stat<T> {
    /// The statistic was computed
    Computed(T),
    /// The filtered record set was empty
    NoData,
    /// The dataset lacks the column this statistic needs
    Unavailable,
}

impl<T> Stat<T> {
    pub fn computed(&self) -> Option<&T> {
        match self {
            Stat::Computed(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Stat::NoData)
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Stat::Unavailable)
    }
}

/// Most frequent value and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mode<K> {
    pub value: K,
    pub count: usize,
}

/// Joint mode of a key pair alongside each component's own mode
///
/// The component modes are computed independently and need not match
/// `joint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairMode<A, B> {
    pub joint: Mode<(A, B)>,
    pub first: Mode<A>,
    pub second: Mode<B>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Meridiem {
    Am,
    Pm,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::Am => write!(f, "am"),
            Meridiem::Pm => write!(f, "pm"),
        }
    }
}

/// An hour of day in 12-hour notation
///
/// Hours 12 through 23 are `pm`; only hours 13 and above are shifted down
/// by twelve. Hour 0 stays `0am` and hour 12 stays `12pm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockHour {
    pub hour: u32,
    pub meridiem: Meridiem,
}

impl ClockHour {
    pub fn from_24h(hour: u32) -> Self {
        let meridiem = if (12..=23).contains(&hour) {
            Meridiem::Pm
        } else {
            Meridiem::Am
        };
        let hour = if hour >= 13 { hour - 12 } else { hour };
        Self { hour, meridiem }
    }
}

impl fmt::Display for ClockHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.hour, self.meridiem)
    }
}

/// Most frequent times of travel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub popular_month: Mode<u32>,
    pub popular_weekday: Mode<u32>,
    pub popular_hour: Mode<u32>,
    pub popular_hour_12h: ClockHour,
}

/// Most popular stations and trip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub popular_start_station: Mode<String>,
    pub popular_end_station: Mode<String>,
    pub popular_trip: Mode<(String, String)>,
}

/// Trip duration totals and extremes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trip_count: usize,
    pub total_seconds: f64,
    pub mean_seconds: f64,
    pub mean_minutes: f64,
    pub min_minutes: f64,
    pub max_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: i32,
    pub most_common_count: usize,
}

/// Demographic breakdowns; counts are in order of first appearance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Stat<Vec<(String, usize)>>,
    pub genders: Stat<Vec<(String, usize)>>,
    pub birth_years: Stat<BirthYearStats>,
}

/// Every statistic group for one filtered query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub filter: FilterSpec,
    pub record_count: usize,
    pub time: Stat<TimeStats>,
    pub stations: Stat<StationStats>,
    pub durations: Stat<DurationStats>,
    pub users: Stat<UserStats>,
}

impl SummaryReport {
    /// A report in which every group is marked as having no data
    pub fn empty(filter: FilterSpec) -> Self {
        Self {
            filter,
            record_count: 0,
            time: Stat::NoData,
            stations: Stat::NoData,
            durations: Stat::NoData,
            users: Stat::NoData,
        }
    }
}

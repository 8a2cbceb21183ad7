//! Trip record model and dataset capabilities

use crate::{timestamp_error, Result};
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

/// Timestamp layouts accepted for the `Start Time` column
const START_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// A single bicycle rental
///
/// `month`, `weekday` and `hour` are derived from `start_time` when the
/// record is built and cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    start_time: NaiveDateTime,
    pub trip_duration_seconds: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    /// Source row id and end time, carried for raw display only
    pub trip_id: Option<String>,
    pub end_time: Option<String>,
    month: u32,
    weekday: u32,
    hour: u32,
}

impl TripRecord {
    /// Create a new trip record, deriving its calendar fields
    pub fn new(
        start_time: NaiveDateTime,
        trip_duration_seconds: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Self {
        Self {
            start_time,
            trip_duration_seconds,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
            trip_id: None,
            end_time: None,
            month: start_time.month(),
            weekday: start_time.weekday().num_days_from_monday(),
            hour: start_time.hour(),
        }
    }

    /// Create a record from a raw `Start Time` string
    pub fn from_raw(
        start_time: &str,
        trip_duration_seconds: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Result<Self> {
        let start_time = Self::parse_start_time(start_time)?;
        Ok(Self::new(start_time, trip_duration_seconds, start_station, end_station))
    }

    /// Parse a start time in any of the supported layouts
    pub fn parse_start_time(value: &str) -> Result<NaiveDateTime> {
        let trimmed = value.trim();
        START_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .ok_or_else(|| timestamp_error("Unrecognized start time format", value))
    }

    pub fn with_user_type(mut self, user_type: impl Into<String>) -> Self {
        self.user_type = Some(user_type.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_birth_year(mut self, birth_year: i32) -> Self {
        self.birth_year = Some(birth_year);
        self
    }

    pub fn with_trip_id(mut self, trip_id: impl Into<String>) -> Self {
        self.trip_id = Some(trip_id.into());
        self
    }

    pub fn with_end_time(mut self, end_time: impl Into<String>) -> Self {
        self.end_time = Some(end_time.into());
        self
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    /// Calendar month, 1 through 12
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Day of week, Monday = 0 through Sunday = 6
    pub fn weekday(&self) -> u32 {
        self.weekday
    }

    /// Hour on the 24-hour clock
    pub fn hour(&self) -> u32 {
        self.hour
    }
}

/// Which optional columns a city's dataset carries
///
/// Absence is a property of the whole dataset. A column that exists may
/// still be empty on individual rows. Only the demographic columns feed
/// statistics; `has_trip_id` and `has_end_time` affect raw display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetSchema {
    pub has_user_type: bool,
    pub has_gender: bool,
    pub has_birth_year: bool,
    pub has_trip_id: bool,
    pub has_end_time: bool,
}

impl DatasetSchema {
    /// Every optional column present
    pub fn full() -> Self {
        Self {
            has_user_type: true,
            has_gender: true,
            has_birth_year: true,
            has_trip_id: true,
            has_end_time: true,
        }
    }

    /// Only the required columns
    pub fn bare() -> Self {
        Self {
            has_user_type: false,
            has_gender: false,
            has_birth_year: false,
            has_trip_id: false,
            has_end_time: false,
        }
    }

    pub fn has_demographics(&self) -> bool {
        self.has_user_type || self.has_gender || self.has_birth_year
    }
}

impl Default for DatasetSchema {
    fn default() -> Self {
        Self::full()
    }
}

impl From<bool> for DatasetSchema {
    fn from(has_user_columns: bool) -> Self {
        if has_user_columns {
            Self::full()
        } else {
            Self::bare()
        }
    }
}

/// The records of one city together with its column capabilities
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub records: Vec<TripRecord>,
    pub schema: DatasetSchema,
}

impl Dataset {
    pub fn new(records: Vec<TripRecord>, schema: DatasetSchema) -> Self {
        Self { records, schema }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

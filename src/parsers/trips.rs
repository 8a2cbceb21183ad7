//! Bikeshare trip CSV loader

use crate::{parse_error, Dataset, DatasetSchema, Result, TripRecord};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const START_TIME: &str = "Start Time";
const END_TIME: &str = "End Time";
const TRIP_DURATION: &str = "Trip Duration";
const START_STATION: &str = "Start Station";
const END_STATION: &str = "End Station";
const USER_TYPE: &str = "User Type";
const GENDER: &str = "Gender";
const BIRTH_YEAR: &str = "Birth Year";
/// The leading row id column is unnamed in the published files
const TRIP_ID: &[&str] = &["", "Unnamed: 0"];

/// Header positions of the columns a trip file may carry
#[derive(Debug, Clone, Copy)]
struct Columns {
    start_time: usize,
    trip_duration: usize,
    start_station: usize,
    end_station: usize,
    user_type: Option<usize>,
    gender: Option<usize>,
    birth_year: Option<usize>,
    trip_id: Option<usize>,
    end_time: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                parse_error(
                    &format!("Missing required column '{}'", name),
                    Some(1),
                    Some(&join(headers)),
                )
            })
        };

        Ok(Self {
            start_time: require(START_TIME)?,
            trip_duration: require(TRIP_DURATION)?,
            start_station: require(START_STATION)?,
            end_station: require(END_STATION)?,
            user_type: find(USER_TYPE),
            gender: find(GENDER),
            birth_year: find(BIRTH_YEAR),
            trip_id: headers.iter().position(|h| TRIP_ID.contains(&h)),
            end_time: find(END_TIME),
        })
    }

    fn schema(&self) -> DatasetSchema {
        DatasetSchema {
            has_user_type: self.user_type.is_some(),
            has_gender: self.gender.is_some(),
            has_birth_year: self.birth_year.is_some(),
            has_trip_id: self.trip_id.is_some(),
            has_end_time: self.end_time.is_some(),
        }
    }
}

/// Parser for the per-city trip CSV files
pub struct TripCsvParser {
    limit: Option<usize>,
}

impl TripCsvParser {
    /// Create a parser that reads every row
    pub fn new() -> Self {
        Self { limit: None }
    }

    /// Stop after the first `limit` data rows
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Load a trip file from disk
    pub fn parse_file(&self, path: &Path) -> Result<Dataset> {
        debug!("Loading trips from {}", path.display());
        let file = File::open(path)?;
        self.parse_reader(file)
    }

    /// Load trips from any CSV source with a header row
    ///
    /// Optional demographic columns are detected from the header. A row
    /// that cannot be parsed fails the whole load.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Dataset> {
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let columns = Columns::from_headers(rdr.headers()?)?;
        let schema = columns.schema();
        debug!("Detected schema {:?}", schema);

        let mut records = Vec::new();
        for result in rdr.records() {
            if self.limit.is_some_and(|limit| records.len() >= limit) {
                info!("Limiting analysis to first {} rows", records.len());
                break;
            }

            let row = result?;
            records.push(self.parse_row(&row, &columns)?);
        }

        info!("Loaded {} trip records", records.len());
        Ok(Dataset::new(records, schema))
    }

    fn parse_row(&self, row: &StringRecord, columns: &Columns) -> Result<TripRecord> {
        let line_number = row.position().map(|p| p.line() as usize);
        let field = |index: usize| row.get(index).unwrap_or("");
        let optional = |index: Option<usize>| index.map(field).filter(|value| !value.is_empty());
        let invalid = |message: String| parse_error(&message, line_number, Some(&join(row)));

        let duration_raw = field(columns.trip_duration);
        let duration = duration_raw
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite() && *d >= 0.0)
            .ok_or_else(|| invalid(format!("Invalid trip duration '{}'", duration_raw)))?;

        let mut record = TripRecord::from_raw(
            field(columns.start_time),
            duration,
            field(columns.start_station),
            field(columns.end_station),
        )?;

        if let Some(trip_id) = optional(columns.trip_id) {
            record = record.with_trip_id(trip_id);
        }
        if let Some(end_time) = optional(columns.end_time) {
            record = record.with_end_time(end_time);
        }
        if let Some(user_type) = optional(columns.user_type) {
            record = record.with_user_type(user_type);
        }
        if let Some(gender) = optional(columns.gender) {
            record = record.with_gender(gender);
        }
        if let Some(raw) = optional(columns.birth_year) {
            let year = raw
                .parse::<f64>()
                .ok()
                .filter(|y| y.is_finite())
                .ok_or_else(|| invalid(format!("Invalid birth year '{}'", raw)))?;
            // files store years as floats such as "1992.0"
            record = record.with_birth_year(year.trunc() as i32);
        }

        Ok(record)
    }
}

impl Default for TripCsvParser {
    fn default() -> Self {
        Self::new()
    }
}

fn join(record: &StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join(",")
}

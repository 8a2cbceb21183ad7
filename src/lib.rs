//! bikeshare-stats - descriptive statistics over bikeshare trip logs
//!
//! Loads a city's trip records, restricts them by month and weekday, and
//! summarizes travel times, stations, trip durations and rider demographics.

pub mod analytics;
pub mod city;
pub mod error;
pub mod output;
pub mod parsers;
pub mod prompt;
pub mod record;
pub mod report;

// Re-export commonly used items
pub use analytics::{aggregate, filter, FilterSpec, StatisticsAggregator};
pub use city::City;
pub use error::{config_error, filter_error, parse_error, timestamp_error, BikeshareError, Result};
pub use output::{FormatConfig, JsonFormatter, RawPager, TextFormatter};
pub use parsers::TripCsvParser;
pub use prompt::Prompter;
pub use record::{Dataset, DatasetSchema, TripRecord};
pub use report::{ClockHour, Mode, PairMode, Stat, SummaryReport};

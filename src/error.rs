//! Error types for bikeshare-stats

use thiserror::Error;

/// Errors produced while loading, filtering and summarizing trip data
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A trip's start time could not be parsed
    #[error("Malformed timestamp '{value}': {message}")]
    MalformedTimestamp { message: String, value: String },

    /// A month or weekday selection outside its domain
    #[error("Invalid {field} filter value: '{value}'")]
    InvalidFilterValue { field: String, value: String },

    /// A mode was requested over zero records
    #[error("No data available for aggregation")]
    NoDataForAggregation,

    /// A row or header could not be turned into a trip record
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        line_number: Option<usize>,
        line_content: Option<String>,
    },

    /// Invalid command line or interactive input
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: Option<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unexpected error: {message}")]
    Unexpected {
        message: String,
        context: Option<String>,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, BikeshareError>;

/// Build a [`BikeshareError::Parse`]
pub fn parse_error(
    message: &str,
    line_number: Option<usize>,
    line_content: Option<&str>,
) -> BikeshareError {
    BikeshareError::Parse {
        message: message.to_string(),
        line_number,
        line_content: line_content.map(|s| s.to_string()),
    }
}

/// Build a [`BikeshareError::MalformedTimestamp`]
pub fn timestamp_error(message: &str, value: &str) -> BikeshareError {
    BikeshareError::MalformedTimestamp {
        message: message.to_string(),
        value: value.to_string(),
    }
}

/// Build a [`BikeshareError::InvalidFilterValue`]
pub fn filter_error(field: &str, value: impl ToString) -> BikeshareError {
    BikeshareError::InvalidFilterValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// Build a [`BikeshareError::Configuration`]
pub fn config_error(message: impl Into<String>, field: Option<&str>) -> BikeshareError {
    BikeshareError::Configuration {
        message: message.into(),
        field: field.map(|f| f.to_string()),
    }
}

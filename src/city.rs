//! Cities with published bikeshare data

use crate::{config_error, BikeshareError, DatasetSchema};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYork,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYork, City::Washington];

    /// File name of the city's trip data
    pub fn file_name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYork => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    pub fn data_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.file_name())
    }

    /// Columns the published file is known to carry
    ///
    /// The loader detects the real schema from the header; this is only the
    /// expectation used for user-facing notices.
    pub fn expected_schema(&self) -> DatasetSchema {
        match self {
            City::Chicago | City::NewYork => DatasetSchema::full(),
            City::Washington => DatasetSchema {
                has_gender: false,
                has_birth_year: false,
                ..DatasetSchema::full()
            },
        }
    }

    /// Name in title case, e.g. "New York"
    pub fn title(&self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYork => "New York",
            City::Washington => "Washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            City::Chicago => write!(f, "chicago"),
            City::NewYork => write!(f, "new york"),
            City::Washington => write!(f, "washington"),
        }
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chicago" => Ok(City::Chicago),
            "new york" | "new-york" | "new_york" | "new york city" | "nyc" => Ok(City::NewYork),
            "washington" => Ok(City::Washington),
            other => {
                let known: Vec<String> = City::ALL.iter().map(City::to_string).collect();
                Err(config_error(
                    format!("Unknown city '{}', expected one of: {}", other, known.join(", ")),
                    Some("city"),
                ))
            }
        }
    }
}

//! Interactive collection of city and filter selections, and raw paging
//!
//! Every question is repeated until the answer is valid. Closing the input
//! stream ends the session with a configuration error.

use crate::analytics::{parse_month, parse_weekday};
use crate::output::{RawPager, TextFormatter};
use crate::{config_error, City, DatasetSchema, FilterSpec, Result, TripRecord};
use log::debug;
use std::io::{BufRead, Write};

/// Which time dimensions the user wants to filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Month,
    Day,
    Both,
    None,
}

impl FilterMode {
    fn parse(input: &str) -> Option<Self> {
        match input {
            "month" => Some(FilterMode::Month),
            "day" => Some(FilterMode::Day),
            "both" => Some(FilterMode::Both),
            "none" => Some(FilterMode::None),
            _ => None,
        }
    }

    fn wants_month(&self) -> bool {
        matches!(self, FilterMode::Month | FilterMode::Both)
    }

    fn wants_day(&self) -> bool {
        matches!(self, FilterMode::Day | FilterMode::Both)
    }
}

/// Line-oriented prompter over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for a city, a filter mode, and the month/day it calls for
    pub fn ask_filters(&mut self) -> Result<(City, FilterSpec)> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        let city = self.ask_city()?;
        let mode = self.ask_filter_mode()?;
        let month = if mode.wants_month() { self.ask_month()? } else { None };
        let weekday = if mode.wants_day() { self.ask_day()? } else { None };

        let spec = FilterSpec::new(month, weekday)?;
        debug!("Selected {} with {:?}", city, spec);
        Ok((city, spec))
    }

    pub fn ask_city(&mut self) -> Result<City> {
        self.ask_until(
            "Would you like to see data for Chicago, New York, or Washington? ",
            |answer| answer.parse::<City>().ok(),
        )
    }

    pub fn ask_filter_mode(&mut self) -> Result<FilterMode> {
        self.ask_until(
            "Would you like to filter the data by month, day, both or not at all?\n\
             Type \"none\" for no time filter.\n",
            FilterMode::parse,
        )
    }

    /// Month number, or `None` for every month
    pub fn ask_month(&mut self) -> Result<Option<u32>> {
        self.ask_until(
            "Which month would you like to explore - January, February, ... or December?\n\
             Type \"all\" for no month filter.\n",
            |answer| parse_month(answer).ok(),
        )
    }

    /// Weekday number (Monday = 0), or `None` for every day
    pub fn ask_day(&mut self) -> Result<Option<u32>> {
        self.ask_until(
            "Which day would you like to explore - Monday, Tuesday, ... or Sunday?\n\
             Type \"all\" for no day filter.\n",
            |answer| parse_weekday(answer).ok(),
        )
    }

    /// True only when the answer is "yes"
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        Ok(self.ask(question)? == "yes")
    }

    /// Offer raw rows a page at a time
    ///
    /// "More?" is only asked while another page remains.
    pub fn page_raw_rows(
        &mut self,
        formatter: &TextFormatter,
        records: &[TripRecord],
        schema: &DatasetSchema,
    ) -> Result<()> {
        if !self.confirm("Do you want to see raw data? Please answer yes or no. ")? {
            return Ok(());
        }

        let mut pages = RawPager::new(records, formatter.config.page_size).peekable();
        while let Some((offset, _)) = pages.next() {
            write!(self.output, "{}", formatter.format_raw_rows(records, schema, offset)?)?;
            if pages.peek().is_none() {
                debug!("Shown all {} raw rows", records.len());
                break;
            }
            if !self.confirm("Do you want to see more raw data? Please answer yes or no. ")? {
                break;
            }
        }

        Ok(())
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }

    fn ask_until<T>(&mut self, question: &str, parse: impl Fn(&str) -> Option<T>) -> Result<T> {
        loop {
            let answer = self.ask(question)?;
            if let Some(value) = parse(&answer) {
                return Ok(value);
            }
            debug!("Rejected answer '{}'", answer);
        }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(config_error("Input closed before an answer was given", None));
        }
        Ok(line.trim().to_lowercase())
    }
}

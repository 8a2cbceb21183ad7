//! Human-readable text output for bikeshare reports

use crate::analytics::{month_name, weekday_name};
use crate::report::{DurationStats, Stat, StationStats, SummaryReport, TimeStats, UserStats};
use crate::{BikeshareError, City, DatasetSchema, Result, TripRecord};
use std::fmt::Write;

const SEPARATOR_WIDTH: usize = 40;
const INDENT: &str = "   ";
const NO_DATA: &str = "No data for the selected filters.";

/// Display settings passed explicitly to the formatters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Wrap headings in ANSI color escapes
    pub enable_color: bool,
    /// Cap on raw rows rendered per call; `None` renders every row asked for
    pub max_rows: Option<usize>,
    /// Cap on cell width in raw tables; `None` never truncates
    pub max_column_width: Option<usize>,
    /// Rows per page when paging raw data
    pub page_size: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            enable_color: false,
            max_rows: None,
            max_column_width: None,
            page_size: 5,
        }
    }
}

/// Text formatter for summary reports and raw trip rows
pub struct TextFormatter {
    pub config: FormatConfig,
    city: Option<City>,
}

impl TextFormatter {
    /// Create a new text formatter with default settings
    pub fn new() -> Self {
        Self::with_config(FormatConfig::default())
    }

    pub fn with_config(config: FormatConfig) -> Self {
        Self { config, city: None }
    }

    pub fn with_color(mut self, enable_color: bool) -> Self {
        self.config.enable_color = enable_color;
        self
    }

    /// Name the city in notices about missing user data
    pub fn with_city(mut self, city: City) -> Self {
        self.city = Some(city);
        self
    }

    /// Format every statistic group of a report
    pub fn format_report(&self, report: &SummaryReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.format_time_stats(&report.time)?);
        output.push_str(&self.format_station_stats(&report.stations)?);
        output.push_str(&self.format_duration_stats(&report.durations)?);
        output.push_str(&self.format_user_stats(&report.users)?);
        Ok(output)
    }

    pub fn format_time_stats(&self, stat: &Stat<TimeStats>) -> Result<String> {
        let mut output = String::new();
        self.heading(&mut output, "Calculating The Most Frequent Times of Travel...")?;

        match stat {
            Stat::Computed(time) => {
                writeln!(
                    output,
                    "{}The most popular month is {} with {} counts.",
                    INDENT,
                    month_name(time.popular_month.value).unwrap_or("unknown"),
                    time.popular_month.count
                )
                .map_err(fmt_error)?;
                writeln!(
                    output,
                    "{}The most popular day of the week is {} with {} counts.",
                    INDENT,
                    weekday_name(time.popular_weekday.value).unwrap_or("unknown"),
                    time.popular_weekday.count
                )
                .map_err(fmt_error)?;
                writeln!(
                    output,
                    "{}The most popular start hour is {} with {} counts.",
                    INDENT, time.popular_hour_12h, time.popular_hour.count
                )
                .map_err(fmt_error)?;
            }
            other => self.missing(&mut output, other, "Time data")?,
        }

        self.separator(&mut output)?;
        Ok(output)
    }

    pub fn format_station_stats(&self, stat: &Stat<StationStats>) -> Result<String> {
        let mut output = String::new();
        self.heading(&mut output, "Calculating The Most Popular Stations and Trip...")?;

        match stat {
            Stat::Computed(stations) => {
                writeln!(
                    output,
                    "{}The most popular start station is {} with {} counts.",
                    INDENT,
                    stations.popular_start_station.value,
                    stations.popular_start_station.count
                )
                .map_err(fmt_error)?;
                writeln!(
                    output,
                    "{}The most popular end station is {} with {} counts.",
                    INDENT, stations.popular_end_station.value, stations.popular_end_station.count
                )
                .map_err(fmt_error)?;
                let (start, end) = &stations.popular_trip.value;
                writeln!(
                    output,
                    "{}The most popular combination of start and end station is \
                     {} (start) - {} (end) with {} counts.",
                    INDENT, start, end, stations.popular_trip.count
                )
                .map_err(fmt_error)?;
            }
            other => self.missing(&mut output, other, "Station data")?,
        }

        self.separator(&mut output)?;
        Ok(output)
    }

    pub fn format_duration_stats(&self, stat: &Stat<DurationStats>) -> Result<String> {
        let mut output = String::new();
        self.heading(&mut output, "Calculating Trip Duration...")?;

        match stat {
            Stat::Computed(durations) => {
                writeln!(
                    output,
                    "{}The total travel time is {} seconds.",
                    INDENT, durations.total_seconds
                )
                .map_err(fmt_error)?;
                writeln!(
                    output,
                    "{}The mean travel time is {} seconds, which is {} minutes.",
                    INDENT, durations.mean_seconds, durations.mean_minutes
                )
                .map_err(fmt_error)?;
                writeln!(
                    output,
                    "{}The shortest travel time is {} minutes, \
                     the longest travel time is {} minutes.",
                    INDENT, durations.min_minutes, durations.max_minutes
                )
                .map_err(fmt_error)?;
            }
            other => self.missing(&mut output, other, "Duration data")?,
        }

        self.separator(&mut output)?;
        Ok(output)
    }

    pub fn format_user_stats(&self, stat: &Stat<UserStats>) -> Result<String> {
        let mut output = String::new();

        let users = match stat {
            Stat::Computed(users) => users,
            Stat::Unavailable => {
                let city = self.city.map(|c| format!(" for {}", c.title())).unwrap_or_default();
                writeln!(output, "\nSorry, there is no user data available{}!", city)
                    .map_err(fmt_error)?;
                self.separator(&mut output)?;
                return Ok(output);
            }
            Stat::NoData => {
                self.heading(&mut output, "Calculating User Stats...")?;
                writeln!(output, "{}{}", INDENT, NO_DATA).map_err(fmt_error)?;
                self.separator(&mut output)?;
                return Ok(output);
            }
        };

        self.heading(&mut output, "Calculating User Stats...")?;
        self.format_counts(&mut output, "user types", &users.user_types)?;
        self.format_counts(&mut output, "genders", &users.genders)?;

        writeln!(output, "{}Showing birth year:", INDENT).map_err(fmt_error)?;
        match &users.birth_years {
            Stat::Computed(years) => {
                writeln!(
                    output,
                    "{0}{0}The earliest birth year is {1}, the latest birth year is {2}.",
                    INDENT, years.earliest, years.latest
                )
                .map_err(fmt_error)?;
                writeln!(
                    output,
                    "{0}{0}The most common birth year is {1} with {2} counts.",
                    INDENT, years.most_common, years.most_common_count
                )
                .map_err(fmt_error)?;
            }
            other => self.missing(&mut output, other, "Birth year data")?,
        }

        self.separator(&mut output)?;
        Ok(output)
    }

    /// Format up to one page of raw rows starting at `offset`
    ///
    /// Only source columns are shown; columns absent from `schema` are left out.
    pub fn format_raw_rows(
        &self,
        records: &[TripRecord],
        schema: &DatasetSchema,
        offset: usize,
    ) -> Result<String> {
        let mut limit = self.config.page_size;
        if let Some(max_rows) = self.config.max_rows {
            limit = limit.min(max_rows);
        }
        let end = records.len().min(offset.saturating_add(limit));
        let page = records.get(offset..end).unwrap_or(&[]);

        let columns = raw_columns(schema);
        let headers: Vec<&str> = std::iter::once("")
            .chain(columns.iter().map(|(header, _)| *header))
            .collect();

        let rows: Vec<Vec<String>> = page
            .iter()
            .enumerate()
            .map(|(i, record)| {
                std::iter::once((offset + i).to_string())
                    .chain(columns.iter().map(|(_, cell)| cell(record)))
                    .map(|cell| self.truncate(cell))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                rows.iter()
                    .map(|row| row[col].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut output = String::new();
        writeln!(output, "{}", align(&headers, &widths)).map_err(fmt_error)?;
        for row in &rows {
            writeln!(output, "{}", align(row, &widths)).map_err(fmt_error)?;
        }

        Ok(output)
    }

    fn format_counts(
        &self,
        output: &mut String,
        label: &str,
        stat: &Stat<Vec<(String, usize)>>,
    ) -> Result<()> {
        writeln!(output, "{}Showing {}:", INDENT, label).map_err(fmt_error)?;
        match stat {
            Stat::Computed(counts) => {
                for (value, count) in counts {
                    writeln!(output, "{0}{0}{1}: {2} counts", INDENT, value, count)
                        .map_err(fmt_error)?;
                }
            }
            other => {
                let mut label = label.to_string();
                if let Some(first) = label.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                self.missing(output, other, &label)?
            }
        }
        Ok(())
    }

    fn missing<T>(&self, output: &mut String, stat: &Stat<T>, what: &str) -> Result<()> {
        let written = match stat {
            Stat::Unavailable => writeln!(output, "{}{} unavailable for this city.", INDENT, what),
            _ => writeln!(output, "{}{}", INDENT, NO_DATA),
        };
        written.map_err(fmt_error)
    }

    fn heading(&self, output: &mut String, title: &str) -> Result<()> {
        let title = bold(title, Some("cyan"), self.config.enable_color);
        writeln!(output, "\n{}\n", title).map_err(fmt_error)
    }

    fn separator(&self, output: &mut String) -> Result<()> {
        writeln!(output, "{}", "-".repeat(SEPARATOR_WIDTH)).map_err(fmt_error)
    }

    fn truncate(&self, cell: String) -> String {
        match self.config.max_column_width {
            Some(width) if cell.chars().count() > width => {
                let mut short: String = cell.chars().take(width.saturating_sub(3)).collect();
                short.push_str("...");
                short
            }
            _ => cell,
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

type Cell = fn(&TripRecord) -> String;

/// Raw table columns in source file order
fn raw_columns(schema: &DatasetSchema) -> Vec<(&'static str, Cell)> {
    let mut columns: Vec<(&'static str, Cell)> = Vec::new();
    if schema.has_trip_id {
        columns.push(("Trip Id", |r: &TripRecord| optional(&r.trip_id)));
    }
    columns.push(("Start Time", |r: &TripRecord| {
        r.start_time().format("%Y-%m-%d %H:%M:%S").to_string()
    }));
    if schema.has_end_time {
        columns.push(("End Time", |r: &TripRecord| optional(&r.end_time)));
    }
    columns.push(("Trip Duration", |r: &TripRecord| r.trip_duration_seconds.to_string()));
    columns.push(("Start Station", |r: &TripRecord| r.start_station.clone()));
    columns.push(("End Station", |r: &TripRecord| r.end_station.clone()));
    if schema.has_user_type {
        columns.push(("User Type", |r: &TripRecord| optional(&r.user_type)));
    }
    if schema.has_gender {
        columns.push(("Gender", |r: &TripRecord| optional(&r.gender)));
    }
    if schema.has_birth_year {
        columns.push(("Birth Year", |r: &TripRecord| {
            r.birth_year.map(|y| y.to_string()).unwrap_or_default()
        }));
    }
    columns
}

fn optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Left-align cells to their column widths
fn align<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

/// Successive pages of raw records
pub struct RawPager<'a> {
    records: &'a [TripRecord],
    page_size: usize,
    offset: usize,
}

impl<'a> RawPager<'a> {
    pub fn new(records: &'a [TripRecord], page_size: usize) -> Self {
        Self {
            records,
            page_size: page_size.max(1),
            offset: 0,
        }
    }
}

impl<'a> Iterator for RawPager<'a> {
    /// Offset of the page's first row, and the page itself
    type Item = (usize, &'a [TripRecord]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.records.len() {
            return None;
        }
        let start = self.offset;
        let end = self.records.len().min(start + self.page_size);
        self.offset = end;
        Some((start, &self.records[start..end]))
    }
}

/// Wrap text in a bold ANSI color when enabled
pub fn bold(text: &str, color: Option<&str>, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }

    let code = match color.unwrap_or("white") {
        "red" => 31,
        "green" => 32,
        "yellow" => 33,
        "blue" => 34,
        "magenta" => 35,
        "cyan" => 36,
        _ => 37,
    };
    format!("\x1b[{};1m{}\x1b[0m", code, text)
}

fn fmt_error(e: std::fmt::Error) -> BikeshareError {
    BikeshareError::Unexpected {
        message: e.to_string(),
        context: Some("text formatting".to_string()),
    }
}

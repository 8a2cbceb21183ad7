//! Time, station, duration and user statistics over filtered trips

use super::frequency::{mode, mode_by, pair_mode, tally};
use crate::report::{
    BirthYearStats, ClockHour, DurationStats, Mode, Stat, StationStats, SummaryReport, TimeStats,
    UserStats,
};
use crate::{BikeshareError, DatasetSchema, FilterSpec, Result, TripRecord};
use log::{debug, info, warn};
use std::time::Instant;

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Computes every statistic group for a filtered record set
pub struct StatisticsAggregator {
    filter: FilterSpec,
}

impl StatisticsAggregator {
    /// Create an aggregator with no filter attached to its reports
    pub fn new() -> Self {
        Self {
            filter: FilterSpec::all(),
        }
    }

    /// Record which filter produced the records being aggregated
    pub fn with_filter(filter: FilterSpec) -> Self {
        Self { filter }
    }

    /// Build a full report
    ///
    /// An empty record set short-circuits to a report where every group is
    /// [`Stat::NoData`]. Otherwise each group is computed on its own, so a
    /// group without data never hides the others.
    pub fn aggregate(&self, records: &[TripRecord], schema: &DatasetSchema) -> SummaryReport {
        if records.is_empty() {
            info!("No records match the selected filters");
            return SummaryReport::empty(self.filter);
        }

        info!("Aggregating statistics over {} records", records.len());

        let users = if schema.has_demographics() {
            timed("user stats", || self.user_stats(records, schema))
        } else {
            debug!("Dataset carries no demographic columns");
            Stat::Unavailable
        };

        SummaryReport {
            filter: self.filter,
            record_count: records.len(),
            time: timed("time of travel", || self.time_stats(records)),
            stations: timed("station stats", || self.station_stats(records)),
            durations: timed("trip duration", || self.duration_stats(records)),
            users,
        }
    }

    /// Most common month, weekday and start hour
    pub fn time_stats(&self, records: &[TripRecord]) -> Result<TimeStats> {
        let popular_month = mode_by(records, TripRecord::month)?;
        let popular_weekday = mode_by(records, TripRecord::weekday)?;
        let popular_hour = mode_by(records, TripRecord::hour)?;
        let popular_hour_12h = ClockHour::from_24h(popular_hour.value);

        Ok(TimeStats {
            popular_month,
            popular_weekday,
            popular_hour,
            popular_hour_12h,
        })
    }

    /// Most common start station, end station and start/end pair
    pub fn station_stats(&self, records: &[TripRecord]) -> Result<StationStats> {
        let stations = pair_mode(
            records,
            |r| r.start_station.as_str(),
            |r| r.end_station.as_str(),
        )?;
        let (start, end) = stations.joint.value;

        Ok(StationStats {
            popular_start_station: owned(stations.first),
            popular_end_station: owned(stations.second),
            popular_trip: Mode {
                value: (start.to_string(), end.to_string()),
                count: stations.joint.count,
            },
        })
    }

    /// Total, mean and extreme trip durations
    pub fn duration_stats(&self, records: &[TripRecord]) -> Result<DurationStats> {
        if records.is_empty() {
            return Err(BikeshareError::NoDataForAggregation);
        }

        let durations = records.iter().map(|r| r.trip_duration_seconds);
        let total_seconds: f64 = durations.clone().sum();
        let min_seconds = durations.clone().fold(f64::INFINITY, f64::min);
        let max_seconds = durations.fold(f64::NEG_INFINITY, f64::max);
        let mean_seconds = total_seconds / records.len() as f64;

        Ok(DurationStats {
            trip_count: records.len(),
            total_seconds,
            mean_seconds,
            mean_minutes: mean_seconds / SECONDS_PER_MINUTE,
            min_minutes: min_seconds / SECONDS_PER_MINUTE,
            max_minutes: max_seconds / SECONDS_PER_MINUTE,
        })
    }

    /// User type and gender counts plus birth year extremes
    ///
    /// Columns missing from `schema` yield [`Stat::Unavailable`]; rows with
    /// an empty value in a present column are skipped.
    pub fn user_stats(&self, records: &[TripRecord], schema: &DatasetSchema) -> Result<UserStats> {
        let user_types = if schema.has_user_type {
            counts(records.iter().filter_map(|r| r.user_type.as_deref()))
        } else {
            Stat::Unavailable
        };

        let genders = if schema.has_gender {
            counts(records.iter().filter_map(|r| r.gender.as_deref()))
        } else {
            Stat::Unavailable
        };

        let birth_years = if schema.has_birth_year {
            let years: Vec<i32> = records.iter().filter_map(|r| r.birth_year).collect();
            into_stat(birth_year_stats(&years))
        } else {
            Stat::Unavailable
        };

        Ok(UserStats {
            user_types,
            genders,
            birth_years,
        })
    }
}

impl Default for StatisticsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate `records`, treating every demographic column as present or absent
pub fn aggregate(records: &[TripRecord], has_user_columns: bool) -> SummaryReport {
    StatisticsAggregator::new().aggregate(records, &DatasetSchema::from(has_user_columns))
}

fn birth_year_stats(years: &[i32]) -> Result<BirthYearStats> {
    let common = mode(years.iter().copied())?;
    let earliest = years.iter().copied().min().ok_or(BikeshareError::NoDataForAggregation)?;
    let latest = years.iter().copied().max().ok_or(BikeshareError::NoDataForAggregation)?;

    Ok(BirthYearStats {
        earliest,
        latest,
        most_common: common.value,
        most_common_count: common.count,
    })
}

fn counts<'a>(values: impl Iterator<Item = &'a str>) -> Stat<Vec<(String, usize)>> {
    let counted: Vec<(String, usize)> = tally(values)
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();

    if counted.is_empty() {
        Stat::NoData
    } else {
        Stat::Computed(counted)
    }
}

fn owned(mode: Mode<&str>) -> Mode<String> {
    Mode {
        value: mode.value.to_string(),
        count: mode.count,
    }
}

fn into_stat<T>(result: Result<T>) -> Stat<T> {
    match result {
        Ok(value) => Stat::Computed(value),
        Err(BikeshareError::NoDataForAggregation) => Stat::NoData,
        Err(e) => {
            warn!("Statistic could not be computed: {}", e);
            Stat::NoData
        }
    }
}

fn timed<T>(group: &str, compute: impl FnOnce() -> Result<T>) -> Stat<T> {
    let started = Instant::now();
    let stat = into_stat(compute());
    debug!("Computed {} in {:?}", group, started.elapsed());
    stat
}

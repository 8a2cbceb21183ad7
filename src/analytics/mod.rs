//! Filtering and statistics over trip records

pub mod aggregator;
pub mod filter;
pub mod frequency;

pub use aggregator::{aggregate, StatisticsAggregator};
pub use filter::{filter, month_name, parse_month, parse_weekday, weekday_name, FilterSpec};

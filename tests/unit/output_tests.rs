//! Unit tests for output formatters
//!
//! Tests text and JSON rendering of reports, missing-data markers, and raw paging

#[path = "../test_data/mod.rs"]
mod test_data;

use bikeshare_stats::output::json::JsonFormatter;
use bikeshare_stats::output::text::{bold, FormatConfig, RawPager, TextFormatter};
use bikeshare_stats::{
    City, Dataset, FilterSpec, StatisticsAggregator, SummaryReport, TripCsvParser,
};

/// Helper function to load a fixture and build its full report
fn report_for(content: &str) -> (Dataset, SummaryReport) {
    let dataset = TripCsvParser::new().parse_reader(content.as_bytes()).unwrap();
    let report = StatisticsAggregator::new().aggregate(&dataset.records, &dataset.schema);
    (dataset, report)
}

#[cfg(test)]
mod text_formatter_tests {
    use super::*;

    #[test]
    fn test_text_formatter_new() {
        let formatter = TextFormatter::new();
        assert!(!formatter.config.enable_color);
        assert_eq!(formatter.config.page_size, 5);
        assert_eq!(formatter.config.max_rows, None);
    }

    #[test]
    fn test_text_formatter_with_color() {
        let formatter = TextFormatter::new().with_color(true);
        assert!(formatter.config.enable_color);

        let formatter = TextFormatter::new().with_color(false);
        assert!(!formatter.config.enable_color);
    }

    #[test]
    fn test_format_report_chicago() {
        let (_, report) = report_for(test_data::chicago_content());
        let output = TextFormatter::new().format_report(&report).unwrap();

        assert!(output.contains("Calculating The Most Frequent Times of Travel..."));
        assert!(output.contains("The most popular month is january with 3 counts."));
        assert!(output.contains("The most popular day of the week is monday with 3 counts."));
        assert!(output.contains("The most popular start hour is 8am with 3 counts."));
        assert!(output.contains("The most popular start station is Wood St with 3 counts."));
        assert!(output.contains("The most popular end station is Clark St with 3 counts."));
        assert!(output.contains(
            "The most popular combination of start and end station is \
             Canal St (start) - Clark St (end) with 2 counts."
        ));
        assert!(output.contains("The total travel time is 3300 seconds."));
        assert!(output.contains(
            "The shortest travel time is 1 minutes, the longest travel time is 20 minutes."
        ));
        assert!(output.contains("Subscriber: 4 counts"));
        assert!(output.contains("Female: 2 counts"));
        assert!(output.contains("The earliest birth year is 1975, the latest birth year is 2000."));
        assert!(output.contains("The most common birth year is 1990 with 2 counts."));
    }

    #[test]
    fn test_user_type_order_follows_first_appearance() {
        let (_, report) = report_for(test_data::chicago_content());
        let output = TextFormatter::new().format_report(&report).unwrap();

        let subscriber = output.find("Subscriber: 4 counts").unwrap();
        let customer = output.find("Customer: 2 counts").unwrap();
        assert!(subscriber < customer);
    }

    #[test]
    fn test_format_partial_demographics() {
        let (_, report) = report_for(test_data::washington_content());
        let output = TextFormatter::new().format_report(&report).unwrap();

        assert!(output.contains("The most popular start hour is 12pm with 2 counts."));
        assert!(output.contains("Showing user types:"));
        assert!(output.contains("Genders unavailable for this city."));
        assert!(output.contains("Birth year data unavailable for this city."));
    }

    #[test]
    fn test_format_no_user_data() {
        let (_, report) = report_for(test_data::bare_content());
        let output = TextFormatter::new()
            .with_city(City::Washington)
            .format_report(&report)
            .unwrap();

        assert!(output.contains("Sorry, there is no user data available for Washington!"));
        assert!(!output.contains("Calculating User Stats..."));
    }

    #[test]
    fn test_format_empty_report() {
        let report = SummaryReport::empty(FilterSpec::new(Some(12), None).unwrap());
        let output = TextFormatter::new().format_report(&report).unwrap();

        assert_eq!(output.matches("No data for the selected filters.").count(), 4);
        assert!(!output.contains("most popular"));
    }

    #[test]
    fn test_format_raw_rows_first_page() {
        let (dataset, _) = report_for(test_data::chicago_content());
        let output = TextFormatter::new()
            .format_raw_rows(&dataset.records, &dataset.schema, 0)
            .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 6); // header + 5 rows
        assert!(lines[0].contains("Trip Id"));
        assert!(lines[0].contains("Start Time"));
        assert!(lines[0].contains("End Time"));
        assert!(lines[0].contains("Birth Year"));
        assert!(!lines[0].contains("month"));
        assert!(lines[1].contains("2017-01-02 08:05:00"));
        assert!(lines[1].contains("2017-01-02 08:10:00"));
        assert!(lines[1].contains("Canal St"));
        assert!(lines[5].starts_with('4'));
    }

    #[test]
    fn test_format_raw_rows_respects_schema() {
        let (dataset, _) = report_for(test_data::washington_content());
        let output = TextFormatter::new()
            .format_raw_rows(&dataset.records, &dataset.schema, 0)
            .unwrap();

        assert!(output.contains("User Type"));
        assert!(!output.contains("Gender"));
        assert!(!output.contains("Birth Year"));
        assert_eq!(output.lines().count(), 4);
    }

    #[test]
    fn test_format_raw_rows_config_limits() {
        let (dataset, _) = report_for(test_data::chicago_content());
        let formatter = TextFormatter::with_config(FormatConfig {
            max_rows: Some(2),
            max_column_width: Some(6),
            ..FormatConfig::default()
        });
        let output = formatter
            .format_raw_rows(&dataset.records, &dataset.schema, 0)
            .unwrap();

        assert_eq!(output.lines().count(), 3);
        assert!(output.contains("Can..."));
        assert!(!output.contains("Canal St"));
    }

    #[test]
    fn test_format_raw_rows_source_column_order() {
        let (dataset, _) = report_for(test_data::chicago_content());
        let output = TextFormatter::new()
            .format_raw_rows(&dataset.records, &dataset.schema, 0)
            .unwrap();
        let header = output.lines().next().unwrap();

        let positions: Vec<usize> = ["Trip Id", "Start Time", "End Time", "Trip Duration", "Gender"]
            .iter()
            .map(|column| header.find(column).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

        let (bare, _) = report_for(test_data::bare_content());
        let output = TextFormatter::new()
            .format_raw_rows(&bare.records, &bare.schema, 0)
            .unwrap();
        assert!(!output.contains("Trip Id"));
        assert!(!output.contains("End Time"));
    }

    #[test]
    fn test_format_raw_rows_past_end() {
        let (dataset, _) = report_for(test_data::chicago_content());
        let output = TextFormatter::new()
            .format_raw_rows(&dataset.records, &dataset.schema, 100)
            .unwrap();
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_raw_pager() {
        let (dataset, _) = report_for(test_data::chicago_content());
        let pages: Vec<(usize, usize)> = RawPager::new(&dataset.records, 5)
            .map(|(offset, page)| (offset, page.len()))
            .collect();

        assert_eq!(pages, vec![(0, 5), (5, 1)]);
    }

    #[test]
    fn test_raw_pager_empty() {
        assert_eq!(RawPager::new(&[], 5).count(), 0);
    }

    #[test]
    fn test_bold_function_no_color() {
        assert_eq!(bold("test", Some("red"), false), "test");
    }

    #[test]
    fn test_bold_function_different_colors() {
        let colors = vec![
            ("red", "\x1b[31;1m"),
            ("green", "\x1b[32;1m"),
            ("cyan", "\x1b[36;1m"),
            ("unknown", "\x1b[37;1m"), // Default to white
        ];

        for (color, expected_code) in colors {
            let result = bold("test", Some(color), true);
            assert!(result.starts_with(expected_code));
            assert!(result.ends_with("\x1b[0m"));
        }
    }

    #[test]
    fn test_colored_headings() {
        let (_, report) = report_for(test_data::chicago_content());
        let output = TextFormatter::new()
            .with_color(true)
            .format_report(&report)
            .unwrap();
        assert!(output.contains("\x1b[36;1mCalculating Trip Duration...\x1b[0m"));
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::*;

    #[test]
    fn test_json_formatter_new() {
        let (_, report) = report_for(test_data::chicago_content());
        let output = JsonFormatter::new().format(&report).unwrap();

        assert!(!output.contains('\n'));
        assert!(!output.contains("metadata"));
    }

    #[test]
    fn test_json_formatter_with_metadata() {
        let (_, report) = report_for(test_data::chicago_content());
        let output = JsonFormatter::new()
            .with_metadata("0.1.0", Some(City::Chicago), 6)
            .format(&report)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["metadata"]["tool_version"], "0.1.0");
        assert_eq!(value["metadata"]["city"], "chicago");
        assert_eq!(value["metadata"]["total_records"], 6);
        assert!(value["metadata"]["generated_at"].is_string());
    }

    #[test]
    fn test_format_report() {
        let (_, report) = report_for(test_data::chicago_content());
        let output = JsonFormatter::new().format(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["record_count"], 6);
        assert_eq!(value["time"]["status"], "computed");
        assert_eq!(value["time"]["value"]["popular_month"]["value"], 1);
        assert_eq!(value["time"]["value"]["popular_hour_12h"]["meridiem"], "am");
        assert_eq!(value["stations"]["value"]["popular_trip"]["value"][0], "Canal St");
        assert_eq!(value["durations"]["value"]["total_seconds"], 3300.0);
        assert_eq!(value["users"]["value"]["user_types"]["value"][0][0], "Subscriber");
        assert_eq!(value["users"]["value"]["user_types"]["value"][0][1], 4);
        assert_eq!(value["filter"]["month"], serde_json::Value::Null);
    }

    #[test]
    fn test_format_missing_markers() {
        let (_, report) = report_for(test_data::washington_content());
        let output = JsonFormatter::new().format(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["users"]["value"]["genders"]["status"], "unavailable");
        assert_eq!(value["users"]["value"]["birth_years"]["status"], "unavailable");

        let empty = SummaryReport::empty(FilterSpec::all());
        let output = JsonFormatter::new().format(&empty).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["durations"]["status"], "no_data");
    }

    #[test]
    fn test_format_pretty_and_metadata() {
        let (_, report) = report_for(test_data::chicago_content());
        let output = JsonFormatter::new()
            .with_pretty(true)
            .with_metadata("0.1.0", Some(City::NewYork), 10)
            .format(&report)
            .unwrap();

        assert!(output.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["metadata"]["city"], "new_york");
        assert_eq!(value["metadata"]["total_records"], 10);
        assert_eq!(value["report"]["record_count"], 6);
    }

    #[test]
    fn test_format_with_trips() {
        let (dataset, report) = report_for(test_data::washington_content());
        let output = JsonFormatter::new()
            .format_with_trips(&report, &dataset.records)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["report"]["record_count"], 3);
        assert!(value.get("metadata").is_none());
        let trips = value["trips"].as_array().unwrap();
        assert_eq!(trips.len(), 3);
        assert_eq!(trips[0]["start_station"], "Jefferson Dr");
        assert_eq!(trips[0]["end_time"], "2017-06-21 12:26:40");
        assert_eq!(trips[0]["trip_id"], "0");
        assert_eq!(trips[0]["hour"], 12);

        let output = JsonFormatter::new()
            .with_metadata("0.1.0", Some(City::Washington), 3)
            .format_with_trips(&report, &dataset.records)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["metadata"]["city"], "washington");
    }
}

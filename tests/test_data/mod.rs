//! Test data generation utilities
//!
//! Provides city trip files with known statistics

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};

/// Six Chicago trips across January, February and March 2017
///
/// Expected over all rows:
/// - month: january (3), weekday: monday (3), hour: 8am (3)
/// - start station: Wood St (3), end station: Clark St (3)
/// - trip: Canal St -> Clark St (2)
/// - durations: total 3300s, mean 550s, min 1 min, max 20 min
/// - user types: Subscriber 4, Customer 2; genders: Male 3, Female 2
/// - birth years: 1975..2000, most common 1990 (2)
pub fn chicago_content() -> &'static str {
    r#",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
0,2017-01-02 08:05:00,2017-01-02 08:10:00,300,Canal St,Clark St,Subscriber,Male,1985.0
1,2017-01-02 08:30:00,2017-01-02 08:40:00,600,Canal St,Clark St,Subscriber,Female,1990.0
2,2017-01-03 17:15:00,2017-01-03 17:30:00,900,Wood St,Canal St,Customer,,
3,2017-02-06 08:45:00,2017-02-06 09:05:00,1200,Wood St,Lake Shore Dr,Subscriber,Male,1990.0
4,2017-02-07 12:00:00,2017-02-07 12:01:00,60,Lake Shore Dr,Clark St,Customer,Female,1975.0
5,2017-03-10 00:20:00,2017-03-10 00:24:00,240,Wood St,Canal St,Subscriber,Male,2000.0
"#
}

/// Three Washington trips in June 2017; no gender or birth year columns
///
/// Expected: month june (3), hour 12pm (2), total 6000s, mean 2000s
pub fn washington_content() -> &'static str {
    r#",Start Time,End Time,Trip Duration,Start Station,End Station,User Type
0,2017-06-21 12:10:00,2017-06-21 12:26:40,1000.0,Jefferson Dr,Lincoln Memorial,Subscriber
1,2017-06-22 13:00:00,2017-06-22 13:33:20,2000.0,Jefferson Dr,Lincoln Memorial,Customer
2,2017-06-23 12:30:00,2017-06-23 13:20:00,3000.0,4th St,Jefferson Dr,Subscriber
"#
}

/// A file with only the required columns
pub fn bare_content() -> &'static str {
    r#"Start Time,Trip Duration,Start Station,End Station
2017-04-03 09:00:00,100,A,B
2017-04-04 10:00:00,200,B,A
"#
}

/// A file whose second row has an unparseable start time
pub fn malformed_timestamp_content() -> &'static str {
    r#"Start Time,Trip Duration,Start Station,End Station
2017-04-03 09:00:00,100,A,B
04/04/2017 10am,200,B,A
"#
}

/// Write `content` as `file_name` inside `dir`
pub fn write_file(dir: &Path, file_name: &str, content: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, content).expect("Failed to write test data file");
    path
}

/// Write the Chicago and Washington fixtures under their city file names
pub fn write_city_files(dir: &Path) {
    write_file(dir, "chicago.csv", chicago_content());
    write_file(dir, "washington.csv", washington_content());
}

/// Generate `num_trips` trips spread over the first half of 2017
pub fn generate_large_city_file(path: &Path, num_trips: usize) -> std::io::Result<()> {
    let stations = ["Canal St", "Clark St", "Wood St", "Lake Shore Dr", "State St"];
    let user_types = ["Subscriber", "Customer"];
    let genders = ["Male", "Female"];
    let base = NaiveDate::from_ymd_opt(2017, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid base time");

    let mut content = String::from(
        ",Start Time,End Time,Trip Duration,Start Station,End Station,\
         User Type,Gender,Birth Year\n",
    );
    for i in 0..num_trips {
        let start = base + Duration::minutes((i as i64 * 37) % (181 * 24 * 60));
        let seconds = 60 + (i % 3000);
        let end = start + Duration::seconds(seconds as i64);
        content.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}.0\n",
            i,
            start.format("%Y-%m-%d %H:%M:%S"),
            end.format("%Y-%m-%d %H:%M:%S"),
            seconds,
            stations[i % stations.len()],
            stations[(i / 2) % stations.len()],
            user_types[i % user_types.len()],
            genders[(i / 3) % genders.len()],
            1950 + (i % 50),
        ));
    }

    fs::write(path, content)
}

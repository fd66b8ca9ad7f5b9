use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Generate default export filename with format: aqi-{granularity}-{YYMMDD}.csv
pub fn generate_default_export_filename(granularity: &str) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!("aqi-{}-{:02}{:02}{:02}.csv", granularity, year, month, day);
    PathBuf::from("output").join(filename)
}

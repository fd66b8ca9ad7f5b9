use crate::error::Result;
use crate::models::{StationDaySummary, StationMonthSummary, StationYearSummary};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

#[derive(Serialize)]
struct DailyRow<'a> {
    date: NaiveDate,
    station: &'a str,
    #[serde(rename = "PM2.5")]
    pm25: f64,
    #[serde(rename = "PM10")]
    pm10: f64,
    #[serde(rename = "SO2")]
    so2: f64,
    #[serde(rename = "NO2")]
    no2: f64,
    #[serde(rename = "CO")]
    co: f64,
    #[serde(rename = "O3")]
    o3: f64,
    #[serde(rename = "TEMP")]
    temp: f64,
    #[serde(rename = "PRES")]
    pres: f64,
    #[serde(rename = "DEWP")]
    dewp: f64,
    #[serde(rename = "RAIN")]
    rain: f64,
    #[serde(rename = "WSPM")]
    wspm: f64,
    #[serde(rename = "AQI")]
    aqi: Option<f64>,
    category: Option<&'static str>,
}

#[derive(Serialize)]
struct MonthlyRow<'a> {
    year: i32,
    month: u32,
    station: &'a str,
    #[serde(rename = "PM2.5")]
    pm25: f64,
    #[serde(rename = "PM10")]
    pm10: f64,
    #[serde(rename = "SO2")]
    so2: f64,
    #[serde(rename = "NO2")]
    no2: f64,
    #[serde(rename = "CO")]
    co: f64,
    #[serde(rename = "O3")]
    o3: f64,
    #[serde(rename = "AQI")]
    aqi: Option<f64>,
    days: usize,
}

#[derive(Serialize)]
struct YearlyRow<'a> {
    year: i32,
    station: &'a str,
    #[serde(rename = "PM2.5")]
    pm25: f64,
    #[serde(rename = "PM10")]
    pm10: f64,
    #[serde(rename = "SO2")]
    so2: f64,
    #[serde(rename = "NO2")]
    no2: f64,
    #[serde(rename = "CO")]
    co: f64,
    #[serde(rename = "O3")]
    o3: f64,
    #[serde(rename = "AQI")]
    aqi: Option<f64>,
    days: usize,
}

/// Writes AQI-annotated aggregates to CSV at the command boundary.
///
/// The core defines no persisted formats; this is the CLI's hand-off to
/// downstream tooling. Empty collections write nothing and create no file.
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write daily summaries; returns the number of rows written.
    pub fn write_daily(&self, summaries: &[StationDaySummary], path: &Path) -> Result<usize> {
        if summaries.is_empty() {
            return Ok(0);
        }

        let mut writer = csv::Writer::from_writer(File::create(path)?);
        for summary in summaries {
            writer.serialize(DailyRow {
                date: summary.date,
                station: &summary.station,
                pm25: summary.pm25,
                pm10: summary.pm10,
                so2: summary.so2,
                no2: summary.no2,
                co: summary.co,
                o3: summary.o3,
                temp: summary.temp,
                pres: summary.pres,
                dewp: summary.dewp,
                rain: summary.rain,
                wspm: summary.wspm,
                aqi: summary.aqi,
                category: summary.category().map(|c| c.label()),
            })?;
        }
        writer.flush()?;
        Ok(summaries.len())
    }

    pub fn write_monthly(&self, summaries: &[StationMonthSummary], path: &Path) -> Result<usize> {
        if summaries.is_empty() {
            return Ok(0);
        }

        let mut writer = csv::Writer::from_writer(File::create(path)?);
        for summary in summaries {
            writer.serialize(MonthlyRow {
                year: summary.year,
                month: summary.month,
                station: &summary.station,
                pm25: summary.pm25,
                pm10: summary.pm10,
                so2: summary.so2,
                no2: summary.no2,
                co: summary.co,
                o3: summary.o3,
                aqi: summary.aqi,
                days: summary.days,
            })?;
        }
        writer.flush()?;
        Ok(summaries.len())
    }

    pub fn write_yearly(&self, summaries: &[StationYearSummary], path: &Path) -> Result<usize> {
        if summaries.is_empty() {
            return Ok(0);
        }

        let mut writer = csv::Writer::from_writer(File::create(path)?);
        for summary in summaries {
            writer.serialize(YearlyRow {
                year: summary.year,
                station: &summary.station,
                pm25: summary.pm25,
                pm10: summary.pm10,
                so2: summary.so2,
                no2: summary.no2,
                co: summary.co,
                o3: summary.o3,
                aqi: summary.aqi,
                days: summary.days,
            })?;
        }
        writer.flush()?;
        Ok(summaries.len())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored_daily() -> StationDaySummary {
        StationDaySummary {
            date: NaiveDate::from_ymd_opt(2016, 2, 14).unwrap(),
            station: "Nongzhanguan".to_string(),
            pm25: 88.25,
            pm10: 120.5,
            so2: 14.0,
            no2: 52.0,
            co: 11.3,
            o3: 21.0,
            temp: 2.5,
            pres: 1024.0,
            dewp: -10.0,
            rain: 0.0,
            wspm: 1.4,
            aqi: Some(166.51),
        }
    }

    #[test]
    fn test_daily_export_includes_aqi_and_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daily.csv");

        let written = CsvWriter::new().write_daily(&[scored_daily()], &path).unwrap();
        assert_eq!(written, 1);

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        let header = lines.next().unwrap();
        assert!(header.contains("PM2.5"));
        assert!(header.contains("AQI"));
        assert!(header.contains("category"));

        let row = lines.next().unwrap();
        assert!(row.starts_with("2016-02-14,Nongzhanguan"));
        assert!(row.contains("166.51"));
        assert!(row.contains("Unhealthy"));
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daily.csv");
        let written = CsvWriter::new().write_daily(&[], &path).unwrap();
        assert_eq!(written, 0);
        assert!(!path.exists());
    }
}

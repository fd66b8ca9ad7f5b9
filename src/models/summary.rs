use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::AqiCategory;

/// Round to the 2 decimal places used for every aggregate mean.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean pollutant and covariate levels for one (date, station) group.
///
/// Exactly one summary exists per (date, station) pair in the cleaned input.
/// The AQI field stays `None` until the scoring pass and is immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationDaySummary {
    pub date: NaiveDate,
    pub station: String,
    pub pm25: f64,
    pub pm10: f64,
    pub so2: f64,
    pub no2: f64,
    pub co: f64,
    pub o3: f64,
    pub temp: f64,
    pub pres: f64,
    pub dewp: f64,
    pub rain: f64,
    pub wspm: f64,
    pub aqi: Option<f64>,
}

impl StationDaySummary {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn category(&self) -> Option<AqiCategory> {
        self.aqi.map(AqiCategory::from_aqi)
    }
}

/// Re-aggregation of scored dailies to (year, month, station).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMonthSummary {
    pub year: i32,
    pub month: u32,
    pub station: String,
    pub pm25: f64,
    pub pm10: f64,
    pub so2: f64,
    pub no2: f64,
    pub co: f64,
    pub o3: f64,
    pub aqi: Option<f64>,
    pub days: usize,
}

/// Re-aggregation of scored dailies to (year, station).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationYearSummary {
    pub year: i32,
    pub station: String,
    pub pm25: f64,
    pub pm10: f64,
    pub so2: f64,
    pub no2: f64,
    pub co: f64,
    pub o3: f64,
    pub aqi: Option<f64>,
    pub days: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(84.333333), 84.33);
        assert_eq!(round2(-4.238), -4.24);
        assert_eq!(round2(10.0), 10.0);
    }

    #[test]
    fn test_category_requires_scoring() {
        let summary = StationDaySummary {
            date: NaiveDate::from_ymd_opt(2016, 6, 1).unwrap(),
            station: "Changping".to_string(),
            pm25: 30.0,
            pm10: 60.0,
            so2: 8.0,
            no2: 40.0,
            co: 9.0,
            o3: 70.0,
            temp: 22.0,
            pres: 1008.0,
            dewp: 12.0,
            rain: 0.0,
            wspm: 2.1,
            aqi: None,
        };
        assert!(summary.category().is_none());
        assert_eq!(summary.year(), 2016);
        assert_eq!(summary.month(), 6);
    }
}

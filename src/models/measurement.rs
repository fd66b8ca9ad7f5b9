use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::error::{ProcessingError, Result};

/// Numeric fields use `NA` (and occasionally an empty cell) as the
/// missing-value marker.
fn na_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("NA") | Some("NaN") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// One hourly observation as ingested from a station CSV file.
///
/// Measurement fields stay optional until cleaning; a row with any missing
/// measurement is dropped, never imputed. Concentrations are non-negative by
/// convention only, so the validator ranges are enforced solely in strict
/// mode.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RawMeasurement {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,

    #[serde(rename = "PM2.5", deserialize_with = "na_f64")]
    #[validate(range(min = 0.0))]
    pub pm25: Option<f64>,

    #[serde(rename = "PM10", deserialize_with = "na_f64")]
    #[validate(range(min = 0.0))]
    pub pm10: Option<f64>,

    #[serde(rename = "SO2", deserialize_with = "na_f64")]
    #[validate(range(min = 0.0))]
    pub so2: Option<f64>,

    #[serde(rename = "NO2", deserialize_with = "na_f64")]
    #[validate(range(min = 0.0))]
    pub no2: Option<f64>,

    #[serde(rename = "CO", deserialize_with = "na_f64")]
    #[validate(range(min = 0.0))]
    pub co: Option<f64>,

    #[serde(rename = "O3", deserialize_with = "na_f64")]
    #[validate(range(min = 0.0))]
    pub o3: Option<f64>,

    #[serde(rename = "TEMP", deserialize_with = "na_f64")]
    pub temp: Option<f64>,

    #[serde(rename = "PRES", deserialize_with = "na_f64")]
    pub pres: Option<f64>,

    #[serde(rename = "DEWP", deserialize_with = "na_f64")]
    pub dewp: Option<f64>,

    #[serde(rename = "RAIN", deserialize_with = "na_f64")]
    pub rain: Option<f64>,

    #[serde(rename = "WSPM", deserialize_with = "na_f64")]
    pub wspm: Option<f64>,

    pub station: String,
}

impl RawMeasurement {
    /// True when every pollutant and covariate carries a value.
    pub fn is_complete(&self) -> bool {
        self.pm25.is_some()
            && self.pm10.is_some()
            && self.so2.is_some()
            && self.no2.is_some()
            && self.co.is_some()
            && self.o3.is_some()
            && self.temp.is_some()
            && self.pres.is_some()
            && self.dewp.is_some()
            && self.rain.is_some()
            && self.wspm.is_some()
    }

    /// Combine the year/month/day components into a calendar date.
    pub fn date(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or(
            ProcessingError::InvalidDate {
                year: self.year,
                month: self.month,
                day: self.day,
            },
        )
    }

    pub fn validate_physical(&self) -> Result<()> {
        self.validate()?;
        Ok(())
    }
}

/// An hourly observation that survived completeness filtering.
///
/// Every field is present; the timestamp components have been collapsed to a
/// date (hour is kept for daily aggregation) and CO has been rescaled by
/// division by 100 exactly once. Cleaned rows are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedMeasurement {
    pub date: NaiveDate,
    pub hour: u32,
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
}

impl CleanedMeasurement {
    /// Build a cleaned row from a complete raw row.
    ///
    /// Returns `Ok(None)` when any measurement is missing. An impossible
    /// calendar date is a data error, not a missing value, and propagates.
    pub fn from_raw(raw: &RawMeasurement) -> Result<Option<Self>> {
        if !raw.is_complete() {
            return Ok(None);
        }

        let date = raw.date()?;

        Ok(Some(Self {
            date,
            hour: raw.hour,
            station: raw.station.clone(),
            pm25: raw.pm25.unwrap_or_default(),
            pm10: raw.pm10.unwrap_or_default(),
            so2: raw.so2.unwrap_or_default(),
            no2: raw.no2.unwrap_or_default(),
            co: raw.co.unwrap_or_default(),
            o3: raw.o3.unwrap_or_default(),
            temp: raw.temp.unwrap_or_default(),
            pres: raw.pres.unwrap_or_default(),
            dewp: raw.dewp.unwrap_or_default(),
            rain: raw.rain.unwrap_or_default(),
            wspm: raw.wspm.unwrap_or_default(),
        }))
    }
}

/// The numeric columns of a cleaned row, in frame order.
///
/// Drives the per-column outlier fence table. Hour is a numeric column of
/// the cleaned frame and participates like any other, though its fences
/// always cover the full 0-23 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    Hour,
    Pm25,
    Pm10,
    So2,
    No2,
    Co,
    O3,
    Temp,
    Pres,
    Dewp,
    Rain,
    Wspm,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 12] = [
        NumericColumn::Hour,
        NumericColumn::Pm25,
        NumericColumn::Pm10,
        NumericColumn::So2,
        NumericColumn::No2,
        NumericColumn::Co,
        NumericColumn::O3,
        NumericColumn::Temp,
        NumericColumn::Pres,
        NumericColumn::Dewp,
        NumericColumn::Rain,
        NumericColumn::Wspm,
    ];

    pub fn value(&self, row: &CleanedMeasurement) -> f64 {
        match self {
            NumericColumn::Hour => row.hour as f64,
            NumericColumn::Pm25 => row.pm25,
            NumericColumn::Pm10 => row.pm10,
            NumericColumn::So2 => row.so2,
            NumericColumn::No2 => row.no2,
            NumericColumn::Co => row.co,
            NumericColumn::O3 => row.o3,
            NumericColumn::Temp => row.temp,
            NumericColumn::Pres => row.pres,
            NumericColumn::Dewp => row.dewp,
            NumericColumn::Rain => row.rain,
            NumericColumn::Wspm => row.wspm,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NumericColumn::Hour => "hour",
            NumericColumn::Pm25 => "PM2.5",
            NumericColumn::Pm10 => "PM10",
            NumericColumn::So2 => "SO2",
            NumericColumn::No2 => "NO2",
            NumericColumn::Co => "CO",
            NumericColumn::O3 => "O3",
            NumericColumn::Temp => "TEMP",
            NumericColumn::Pres => "PRES",
            NumericColumn::Dewp => "DEWP",
            NumericColumn::Rain => "RAIN",
            NumericColumn::Wspm => "WSPM",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_raw() -> RawMeasurement {
        RawMeasurement {
            year: 2016,
            month: 3,
            day: 14,
            hour: 7,
            pm25: Some(84.0),
            pm10: Some(102.0),
            so2: Some(11.0),
            no2: Some(47.0),
            co: Some(900.0),
            o3: Some(62.0),
            temp: Some(6.4),
            pres: Some(1021.3),
            dewp: Some(-4.2),
            rain: Some(0.0),
            wspm: Some(1.7),
            station: "Aotizhongxin".to_string(),
        }
    }

    #[test]
    fn test_incomplete_row_yields_none() {
        let mut raw = complete_raw();
        raw.dewp = None;
        assert!(!raw.is_complete());
        assert!(CleanedMeasurement::from_raw(&raw).unwrap().is_none());
    }

    #[test]
    fn test_date_derivation() {
        let raw = complete_raw();
        let cleaned = CleanedMeasurement::from_raw(&raw).unwrap().unwrap();
        assert_eq!(cleaned.date, NaiveDate::from_ymd_opt(2016, 3, 14).unwrap());
        assert_eq!(cleaned.hour, 7);
    }

    #[test]
    fn test_invalid_calendar_date_is_an_error() {
        let mut raw = complete_raw();
        raw.month = 2;
        raw.day = 30;
        assert!(CleanedMeasurement::from_raw(&raw).is_err());
    }

    #[test]
    fn test_physical_validation_rejects_negative_concentration() {
        let mut raw = complete_raw();
        assert!(raw.validate_physical().is_ok());
        raw.so2 = Some(-3.0);
        assert!(raw.validate_physical().is_err());
    }

    #[test]
    fn test_numeric_column_accessors() {
        let raw = complete_raw();
        let cleaned = CleanedMeasurement::from_raw(&raw).unwrap().unwrap();
        assert_eq!(NumericColumn::Hour.value(&cleaned), 7.0);
        assert_eq!(NumericColumn::Co.value(&cleaned), 900.0);
        assert_eq!(NumericColumn::Wspm.name(), "WSPM");
        assert_eq!(NumericColumn::ALL.len(), 12);
    }
}

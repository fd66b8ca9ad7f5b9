/// Pollutant column headers as they appear in the source CSV files
pub const COL_PM25: &str = "PM2.5";
pub const COL_PM10: &str = "PM10";
pub const COL_SO2: &str = "SO2";
pub const COL_NO2: &str = "NO2";
pub const COL_CO: &str = "CO";
pub const COL_O3: &str = "O3";

/// Meteorological covariate column headers
pub const COL_TEMP: &str = "TEMP";
pub const COL_PRES: &str = "PRES";
pub const COL_DEWP: &str = "DEWP";
pub const COL_RAIN: &str = "RAIN";
pub const COL_WSPM: &str = "WSPM";

/// Timestamp and identity column headers
pub const COL_YEAR: &str = "year";
pub const COL_MONTH: &str = "month";
pub const COL_DAY: &str = "day";
pub const COL_HOUR: &str = "hour";
pub const COL_STATION: &str = "station";

/// Columns that must be present in every ingested file
pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_YEAR,
    COL_MONTH,
    COL_DAY,
    COL_HOUR,
    COL_PM25,
    COL_PM10,
    COL_SO2,
    COL_NO2,
    COL_CO,
    COL_O3,
    COL_TEMP,
    COL_PRES,
    COL_DEWP,
    COL_RAIN,
    COL_WSPM,
    COL_STATION,
];

/// CO is reported in ug/m3 and rescaled once to the mg/m3 range of its
/// breakpoint table
pub const CO_UNIT_DIVISOR: f64 = 100.0;

/// Tukey fence multiplier applied to the interquartile range
pub const IQR_FENCE_MULTIPLIER: f64 = 1.5;

/// Maximum span accepted by a date-window query
pub const MAX_WINDOW_DAYS: i64 = 140;

/// Upper AQI bounds for the first five categories; the sixth is open-ended.
/// The fifth bucket tops out at 300 (the 201-300 table variant).
pub const CATEGORY_UPPER_BOUNDS: [f64; 5] = [50.0, 100.0, 150.0, 200.0, 300.0];

use crate::error::{ProcessingError, Result};
use crate::models::StationDaySummary;
use crate::utils::constants::MAX_WINDOW_DAYS;
use chrono::NaiveDate;

/// An inclusive date range for AQI time-series queries, capped at 140 days.
///
/// Construction is the validation boundary: a caller holding a `DateWindow`
/// holds a permitted one. Oversized or inverted ranges are rejected with an
/// explanatory error, never a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(ProcessingError::InvalidFormat(format!(
                "window end {} precedes start {}",
                end, start
            )));
        }

        let days = (end - start).num_days();
        if days > MAX_WINDOW_DAYS {
            return Err(ProcessingError::WindowTooWide {
                days,
                max: MAX_WINDOW_DAYS,
            });
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The scored daily rows inside a window, optionally for one station, in
/// (station, date) order.
pub fn aqi_series<'a>(
    dailies: &'a [StationDaySummary],
    window: &DateWindow,
    station: Option<&str>,
) -> Vec<&'a StationDaySummary> {
    dailies
        .iter()
        .filter(|daily| window.contains(daily.date))
        .filter(|daily| station.map_or(true, |name| daily.station == name))
        .collect()
}

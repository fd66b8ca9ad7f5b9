use crate::models::{
    round2, CleanedMeasurement, StationDaySummary, StationMonthSummary, StationYearSummary,
};
use chrono::NaiveDate;
use std::collections::HashMap;

#[derive(Default)]
struct MeanAccumulator {
    sums: [f64; 11],
    count: usize,
}

impl MeanAccumulator {
    fn add(&mut self, row: &CleanedMeasurement) {
        let values = [
            row.pm25, row.pm10, row.so2, row.no2, row.co, row.o3, row.temp, row.pres, row.dewp,
            row.rain, row.wspm,
        ];
        for (sum, value) in self.sums.iter_mut().zip(values) {
            *sum += value;
        }
        self.count += 1;
    }

    fn means(&self) -> [f64; 11] {
        let mut means = [0.0; 11];
        for (mean, sum) in means.iter_mut().zip(self.sums) {
            *mean = round2(sum / self.count as f64);
        }
        means
    }
}

/// Groups cleaned hourly rows into per-station aggregates.
///
/// Group membership is the only semantic guarantee; output order is fixed to
/// (station, period) so repeated runs produce identical collections.
pub struct Aggregator;

impl Aggregator {
    /// One summary per (date, station) pair, each field the arithmetic mean
    /// of the contributing hourly rows rounded to 2 decimals. A group exists
    /// only if at least one row contributes, so means are always defined.
    pub fn aggregate_daily(rows: &[CleanedMeasurement]) -> Vec<StationDaySummary> {
        let mut groups: HashMap<(NaiveDate, String), MeanAccumulator> = HashMap::new();

        for row in rows {
            groups
                .entry((row.date, row.station.clone()))
                .or_default()
                .add(row);
        }

        let mut summaries: Vec<StationDaySummary> = groups
            .into_iter()
            .map(|((date, station), acc)| {
                let [pm25, pm10, so2, no2, co, o3, temp, pres, dewp, rain, wspm] = acc.means();
                StationDaySummary {
                    date,
                    station,
                    pm25,
                    pm10,
                    so2,
                    no2,
                    co,
                    o3,
                    temp,
                    pres,
                    dewp,
                    rain,
                    wspm,
                    aqi: None,
                }
            })
            .collect();

        summaries.sort_by(|a, b| a.station.cmp(&b.station).then(a.date.cmp(&b.date)));
        summaries
    }

    /// Regroup scored dailies by (year, month, station) with the same
    /// mean-and-round policy. The AQI mean covers the scored rows of the
    /// group and is absent when none are scored.
    pub fn aggregate_monthly(dailies: &[StationDaySummary]) -> Vec<StationMonthSummary> {
        let mut groups: HashMap<(i32, u32, String), Vec<&StationDaySummary>> = HashMap::new();
        for daily in dailies {
            groups
                .entry((daily.year(), daily.month(), daily.station.clone()))
                .or_default()
                .push(daily);
        }

        let mut summaries: Vec<StationMonthSummary> = groups
            .into_iter()
            .map(|((year, month, station), rows)| StationMonthSummary {
                year,
                month,
                station,
                pm25: mean_of(&rows, |r| r.pm25),
                pm10: mean_of(&rows, |r| r.pm10),
                so2: mean_of(&rows, |r| r.so2),
                no2: mean_of(&rows, |r| r.no2),
                co: mean_of(&rows, |r| r.co),
                o3: mean_of(&rows, |r| r.o3),
                aqi: mean_aqi(&rows),
                days: rows.len(),
            })
            .collect();

        summaries.sort_by(|a, b| {
            a.station
                .cmp(&b.station)
                .then(a.year.cmp(&b.year))
                .then(a.month.cmp(&b.month))
        });
        summaries
    }

    /// Regroup scored dailies by (year, station).
    pub fn aggregate_yearly(dailies: &[StationDaySummary]) -> Vec<StationYearSummary> {
        let mut groups: HashMap<(i32, String), Vec<&StationDaySummary>> = HashMap::new();
        for daily in dailies {
            groups
                .entry((daily.year(), daily.station.clone()))
                .or_default()
                .push(daily);
        }

        let mut summaries: Vec<StationYearSummary> = groups
            .into_iter()
            .map(|((year, station), rows)| StationYearSummary {
                year,
                station,
                pm25: mean_of(&rows, |r| r.pm25),
                pm10: mean_of(&rows, |r| r.pm10),
                so2: mean_of(&rows, |r| r.so2),
                no2: mean_of(&rows, |r| r.no2),
                co: mean_of(&rows, |r| r.co),
                o3: mean_of(&rows, |r| r.o3),
                aqi: mean_aqi(&rows),
                days: rows.len(),
            })
            .collect();

        summaries.sort_by(|a, b| a.station.cmp(&b.station).then(a.year.cmp(&b.year)));
        summaries
    }
}

fn mean_of(rows: &[&StationDaySummary], field: impl Fn(&StationDaySummary) -> f64) -> f64 {
    round2(rows.iter().map(|row| field(row)).sum::<f64>() / rows.len() as f64)
}

fn mean_aqi(rows: &[&StationDaySummary]) -> Option<f64> {
    let scored: Vec<f64> = rows.iter().filter_map(|row| row.aqi).collect();
    if scored.is_empty() {
        None
    } else {
        Some(round2(scored.iter().sum::<f64>() / scored.len() as f64))
    }
}

use crate::analyzers::DateWindow;
use crate::models::{AqiCategory, StationDaySummary};
use std::collections::HashMap;

type ColumnAccessor = (&'static str, fn(&StationDaySummary) -> f64);

/// The numeric daily-summary columns, in frame order, for correlation.
const NUMERIC_COLUMNS: [ColumnAccessor; 11] = [
    ("PM2.5", |s| s.pm25),
    ("PM10", |s| s.pm10),
    ("SO2", |s| s.so2),
    ("NO2", |s| s.no2),
    ("CO", |s| s.co),
    ("O3", |s| s.o3),
    ("TEMP", |s| s.temp),
    ("PRES", |s| s.pres),
    ("DEWP", |s| s.dewp),
    ("RAIN", |s| s.rain),
    ("WSPM", |s| s.wspm),
];

/// Full pairwise Pearson correlation over the numeric daily columns.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub labels: Vec<&'static str>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let row = self.labels.iter().position(|label| *label == a)?;
        let col = self.labels.iter().position(|label| *label == b)?;
        Some(self.values[row][col])
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        let header: Vec<String> = self.labels.iter().map(|l| format!("{:>7}", l)).collect();
        lines.push(format!("{:7} {}", "", header.join(" ")));
        for (label, row) in self.labels.iter().zip(&self.values) {
            let cells: Vec<String> = row.iter().map(|v| format!("{:>7.2}", v)).collect();
            lines.push(format!("{:7} {}", label, cells.join(" ")));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Mean AQI for one station over the queried rows.
#[derive(Debug, Clone, PartialEq)]
pub struct StationMeanAqi {
    pub station: String,
    pub mean_aqi: f64,
    pub days: usize,
}

/// Stations ordered by mean AQI.
#[derive(Debug, Clone)]
pub struct StationRanking {
    pub entries: Vec<StationMeanAqi>,
    pub order: SortOrder,
}

impl StationRanking {
    /// The station with the lowest mean AQI.
    pub fn best(&self) -> Option<&StationMeanAqi> {
        self.entries
            .iter()
            .min_by(|a, b| a.mean_aqi.total_cmp(&b.mean_aqi))
    }

    /// The station with the highest mean AQI.
    pub fn worst(&self) -> Option<&StationMeanAqi> {
        self.entries
            .iter()
            .max_by(|a, b| a.mean_aqi.total_cmp(&b.mean_aqi))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearlyMeanAqi {
    pub year: i32,
    pub mean_aqi: f64,
    pub days: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyMeanAqi {
    pub year: i32,
    pub month: u32,
    pub mean_aqi: f64,
}

/// One category's share of the scored rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: AqiCategory,
    pub count: usize,
    pub percentage: f64,
}

/// Read-only derived views over the scored daily aggregates.
///
/// Every view is a pure reduction; the summaries are never mutated and each
/// call recomputes from scratch.
pub struct SummaryStats;

impl SummaryStats {
    pub fn correlation_matrix(dailies: &[StationDaySummary]) -> CorrelationMatrix {
        let columns: Vec<Vec<f64>> = NUMERIC_COLUMNS
            .iter()
            .map(|(_, accessor)| dailies.iter().map(accessor).collect())
            .collect();

        let n = NUMERIC_COLUMNS.len();
        let mut values = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in 0..n {
                values[i][j] = pearson(&columns[i], &columns[j]);
            }
        }

        CorrelationMatrix {
            labels: NUMERIC_COLUMNS.iter().map(|(label, _)| *label).collect(),
            values,
        }
    }

    /// Mean AQI per station over an optional window, in the requested order.
    /// Unscored rows are excluded.
    pub fn mean_aqi_by_station(
        dailies: &[StationDaySummary],
        window: Option<&DateWindow>,
        order: SortOrder,
    ) -> StationRanking {
        let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
        for daily in Self::windowed(dailies, window) {
            if let Some(aqi) = daily.aqi {
                let entry = sums.entry(daily.station.as_str()).or_insert((0.0, 0));
                entry.0 += aqi;
                entry.1 += 1;
            }
        }

        let mut entries: Vec<StationMeanAqi> = sums
            .into_iter()
            .map(|(station, (sum, days))| StationMeanAqi {
                station: station.to_string(),
                mean_aqi: sum / days as f64,
                days,
            })
            .collect();

        entries.sort_by(|a, b| match order {
            SortOrder::Ascending => a.mean_aqi.total_cmp(&b.mean_aqi),
            SortOrder::Descending => b.mean_aqi.total_cmp(&a.mean_aqi),
        });

        StationRanking { entries, order }
    }

    /// Mean AQI per calendar year, chronological.
    pub fn mean_aqi_by_year(dailies: &[StationDaySummary]) -> Vec<YearlyMeanAqi> {
        let mut sums: HashMap<i32, (f64, usize)> = HashMap::new();
        for daily in dailies {
            if let Some(aqi) = daily.aqi {
                let entry = sums.entry(daily.year()).or_insert((0.0, 0));
                entry.0 += aqi;
                entry.1 += 1;
            }
        }

        let mut years: Vec<YearlyMeanAqi> = sums
            .into_iter()
            .map(|(year, (sum, days))| YearlyMeanAqi {
                year,
                mean_aqi: sum / days as f64,
                days,
            })
            .collect();
        years.sort_by_key(|entry| entry.year);
        years
    }

    /// Mean AQI per (year, month), chronological.
    pub fn mean_aqi_by_month(dailies: &[StationDaySummary]) -> Vec<MonthlyMeanAqi> {
        let mut sums: HashMap<(i32, u32), (f64, usize)> = HashMap::new();
        for daily in dailies {
            if let Some(aqi) = daily.aqi {
                let entry = sums.entry((daily.year(), daily.month())).or_insert((0.0, 0));
                entry.0 += aqi;
                entry.1 += 1;
            }
        }

        let mut months: Vec<MonthlyMeanAqi> = sums
            .into_iter()
            .map(|((year, month), (sum, count))| MonthlyMeanAqi {
                year,
                month,
                mean_aqi: sum / count as f64,
            })
            .collect();
        months.sort_by_key(|entry| (entry.year, entry.month));
        months
    }

    /// Count and share of scored rows per category. Every scored row maps to
    /// exactly one category, so the percentages sum to 100.
    pub fn category_breakdown(
        dailies: &[StationDaySummary],
        window: Option<&DateWindow>,
    ) -> Vec<CategoryShare> {
        let mut counts: HashMap<AqiCategory, usize> = HashMap::new();
        let mut total = 0usize;
        for daily in Self::windowed(dailies, window) {
            if let Some(category) = daily.category() {
                *counts.entry(category).or_insert(0) += 1;
                total += 1;
            }
        }

        AqiCategory::ALL
            .iter()
            .map(|category| {
                let count = counts.get(category).copied().unwrap_or(0);
                CategoryShare {
                    category: *category,
                    count,
                    percentage: if total == 0 {
                        0.0
                    } else {
                        count as f64 / total as f64 * 100.0
                    },
                }
            })
            .collect()
    }

    fn windowed<'a>(
        dailies: &'a [StationDaySummary],
        window: Option<&DateWindow>,
    ) -> impl Iterator<Item = &'a StationDaySummary> + 'a {
        let window = window.copied();
        dailies
            .iter()
            .filter(move |daily| window.map_or(true, |w| w.contains(daily.date)))
    }
}

fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }

    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();

    if denominator.abs() < 1e-10 {
        0.0
    } else {
        numerator / denominator
    }
}

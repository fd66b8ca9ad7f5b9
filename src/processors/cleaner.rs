use crate::error::Result;
use crate::models::{CleanedMeasurement, NumericColumn, RawMeasurement};
use crate::utils::constants::{CO_UNIT_DIVISOR, IQR_FENCE_MULTIPLIER};
use tracing::debug;

/// Per-column outlier bounds.
///
/// Quartiles are taken once, over the entire cleaned-and-rescaled dataset,
/// before any row is rejected. They are never recomputed from the filtered
/// set; the fences are a property of the dataset as ingested, not of the
/// survivors.
#[derive(Debug, Clone)]
pub struct FenceTable {
    fences: Vec<(NumericColumn, f64, f64)>,
}

impl FenceTable {
    pub fn compute(rows: &[CleanedMeasurement]) -> Self {
        let mut fences = Vec::with_capacity(NumericColumn::ALL.len());

        for column in NumericColumn::ALL {
            let mut values: Vec<f64> = rows.iter().map(|row| column.value(row)).collect();
            values.sort_by(f64::total_cmp);

            let q1 = quantile_sorted(&values, 0.25);
            let q3 = quantile_sorted(&values, 0.75);
            let iqr = q3 - q1;

            fences.push((
                column,
                q1 - IQR_FENCE_MULTIPLIER * iqr,
                q3 + IQR_FENCE_MULTIPLIER * iqr,
            ));
        }

        Self { fences }
    }

    /// All-or-nothing retention: one column outside its fence rejects the
    /// whole row.
    pub fn admits(&self, row: &CleanedMeasurement) -> bool {
        self.fences.iter().all(|(column, lower, upper)| {
            let value = column.value(row);
            *lower <= value && value <= *upper
        })
    }

    pub fn bounds(&self, column: NumericColumn) -> Option<(f64, f64)> {
        self.fences
            .iter()
            .find(|(c, _, _)| *c == column)
            .map(|(_, lower, upper)| (*lower, *upper))
    }
}

/// Linear-interpolation quantile of a sorted, non-empty slice (the same
/// method pandas and numpy default to).
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let position = (n - 1) as f64 * q;
    let lower = position.floor() as usize;
    let fraction = position - lower as f64;

    if fraction == 0.0 {
        sorted[lower]
    } else {
        sorted[lower] + fraction * (sorted[lower + 1] - sorted[lower])
    }
}

/// Row counts for each stage of cleaning.
#[derive(Debug, Clone, Default)]
pub struct CleaningReport {
    pub raw_rows: usize,
    pub incomplete_dropped: usize,
    pub outliers_dropped: usize,
    pub clean_rows: usize,
}

impl CleaningReport {
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        lines.push("Cleaning Summary".to_string());
        lines.push("================".to_string());
        lines.push(format!("Raw rows:            {}", self.raw_rows));
        lines.push(format!("Incomplete dropped:  {}", self.incomplete_dropped));
        lines.push(format!("Outliers dropped:    {}", self.outliers_dropped));
        lines.push(format!("Clean rows:          {}", self.clean_rows));
        if self.raw_rows > 0 {
            lines.push(format!(
                "Retention:           {:.1}%",
                self.clean_rows as f64 / self.raw_rows as f64 * 100.0
            ));
        }
        lines.join("\n")
    }
}

/// Turns raw hourly rows into the cleaned dataset the rest of the pipeline
/// consumes.
///
/// Stages, in order: drop rows with any missing measurement, collapse the
/// timestamp components into a date, divide CO by 100, then reject
/// multivariate outliers against the precomputed fence table.
pub struct RecordCleaner;

impl RecordCleaner {
    pub fn new() -> Self {
        Self
    }

    pub fn clean(
        &self,
        raw: &[RawMeasurement],
    ) -> Result<(Vec<CleanedMeasurement>, CleaningReport)> {
        let mut report = CleaningReport {
            raw_rows: raw.len(),
            ..Default::default()
        };

        let mut complete = Vec::with_capacity(raw.len());
        for row in raw {
            match CleanedMeasurement::from_raw(row)? {
                Some(mut cleaned) => {
                    cleaned.co /= CO_UNIT_DIVISOR;
                    complete.push(cleaned);
                }
                None => report.incomplete_dropped += 1,
            }
        }

        if complete.is_empty() {
            return Ok((complete, report));
        }

        let fences = FenceTable::compute(&complete);
        let before = complete.len();
        complete.retain(|row| fences.admits(row));
        report.outliers_dropped = before - complete.len();
        report.clean_rows = complete.len();

        debug!(
            "cleaned {} raw rows to {} ({} incomplete, {} outliers)",
            report.raw_rows, report.clean_rows, report.incomplete_dropped, report.outliers_dropped
        );

        Ok((complete, report))
    }
}

impl Default for RecordCleaner {
    fn default() -> Self {
        Self::new()
    }
}

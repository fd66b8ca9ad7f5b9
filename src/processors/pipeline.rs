use crate::aqi::score_summaries;
use crate::error::Result;
use crate::models::{RawMeasurement, StationDaySummary};
use crate::processors::{Aggregator, CleaningReport, RecordCleaner};
use crate::readers::ConcurrentReader;
use crate::utils::progress::ProgressReporter;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::Path;

/// What a pipeline run saw and produced, for the user-facing report.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub cleaning: CleaningReport,
    pub summary_rows: usize,
    pub stations: Vec<String>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl PipelineReport {
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        lines.push(self.cleaning.summary());
        lines.push(String::new());
        lines.push(format!("Station-day summaries: {}", self.summary_rows));
        lines.push(format!(
            "Stations ({}):        {}",
            self.stations.len(),
            self.stations.join(", ")
        ));
        if let Some((first, last)) = self.date_range {
            lines.push(format!("Date range:           {} to {}", first, last));
        }
        lines.join("\n")
    }
}

/// The full batch pipeline: read, clean, aggregate, score.
///
/// Each stage is a pure function of the previous stage's output; the run
/// holds no state between invocations and can be repeated on the same input
/// for identical results.
pub struct AqiPipeline {
    max_workers: usize,
    strict_validation: bool,
}

impl AqiPipeline {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers,
            strict_validation: false,
        }
    }

    pub fn with_strict_validation(mut self, strict_validation: bool) -> Self {
        self.strict_validation = strict_validation;
        self
    }

    /// Run the pipeline over every CSV file in a directory.
    pub async fn process_directory(
        &self,
        dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<(Vec<StationDaySummary>, PipelineReport)> {
        if let Some(p) = progress {
            p.set_message("Reading measurement files...");
        }

        let raw = ConcurrentReader::new(self.max_workers)
            .with_strict_validation(self.strict_validation)
            .read_directory(dir)
            .await?;

        self.process_records(&raw, progress)
    }

    /// Run the in-memory stages over already-ingested raw rows.
    pub fn process_records(
        &self,
        raw: &[RawMeasurement],
        progress: Option<&ProgressReporter>,
    ) -> Result<(Vec<StationDaySummary>, PipelineReport)> {
        if let Some(p) = progress {
            p.set_message("Cleaning records...");
        }
        let (clean, cleaning) = RecordCleaner::new().clean(raw)?;

        if let Some(p) = progress {
            p.set_message("Aggregating daily means...");
        }
        let mut summaries = Aggregator::aggregate_daily(&clean);

        if let Some(p) = progress {
            p.set_message("Scoring AQI...");
        }
        score_summaries(&mut summaries);

        let stations: BTreeSet<String> = summaries.iter().map(|s| s.station.clone()).collect();
        let date_range = match (
            summaries.iter().map(|s| s.date).min(),
            summaries.iter().map(|s| s.date).max(),
        ) {
            (Some(first), Some(last)) => Some((first, last)),
            _ => None,
        };

        let report = PipelineReport {
            cleaning,
            summary_rows: summaries.len(),
            stations: stations.into_iter().collect(),
            date_range,
        };

        if let Some(p) = progress {
            p.finish_with_message("Processing complete");
        }

        Ok((summaries, report))
    }
}

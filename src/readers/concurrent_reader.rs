use crate::error::{ProcessingError, Result};
use crate::models::RawMeasurement;
use crate::readers::MeasurementReader;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads every station CSV in a directory in parallel and merges the rows.
///
/// Files are concatenated with no deduplication: duplicate (date, hour,
/// station) rows are independent samples and all of them feed the
/// aggregate means.
pub struct ConcurrentReader {
    max_workers: usize,
    strict_validation: bool,
}

impl ConcurrentReader {
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

    /// Read all `*.csv` files under `dir` concurrently.
    pub async fn read_directory(&self, dir: &Path) -> Result<Vec<RawMeasurement>> {
        let files = Self::find_csv_files(dir)?;
        debug!("found {} csv files in {}", files.len(), dir.display());

        if files.is_empty() {
            return Ok(Vec::new());
        }

        let strict = self.strict_validation;
        let max_workers = self.max_workers.max(1);

        let merged = tokio::task::spawn_blocking(move || -> Result<Vec<RawMeasurement>> {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(max_workers)
                .build()
                .map_err(|e| ProcessingError::Config(format!("thread pool: {e}")))?;

            pool.install(|| {
                let per_file: Vec<Result<Vec<RawMeasurement>>> = files
                    .par_iter()
                    .map(|path| {
                        MeasurementReader::with_strict_validation(strict).read_measurements(path)
                    })
                    .collect();

                let mut merged = Vec::new();
                for file_records in per_file {
                    merged.extend(file_records?);
                }
                Ok(merged)
            })
        })
        .await??;

        debug!("merged {} raw measurement rows", merged.len());
        Ok(merged)
    }

    /// Collect the CSV files of a directory in filename order, so merged
    /// output is reproducible run to run.
    fn find_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .map(|ext| ext.eq_ignore_ascii_case("csv"))
                        .unwrap_or(false)
            })
            .collect();
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    const HEADER: &str =
        "No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station";

    fn write_station_file(dir: &Path, name: &str, station: &str, rows: usize) {
        let mut file = File::create(dir.join(name)).unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for hour in 0..rows {
            writeln!(
                file,
                "{},2016,5,2,{},10.0,20.0,4.0,30.0,400.0,60.0,15.0,1010.0,5.0,0.0,NE,2.0,{}",
                hour + 1,
                hour,
                station
            )
            .unwrap();
        }
    }

    #[tokio::test]
    async fn test_reads_and_merges_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_station_file(dir.path(), "a.csv", "Gucheng", 3);
        write_station_file(dir.path(), "b.csv", "Wanliu", 2);
        File::create(dir.path().join("notes.txt")).unwrap();

        let records = ConcurrentReader::new(2)
            .read_directory(dir.path())
            .await
            .unwrap();
        assert_eq!(records.len(), 5);
        // Filename order: a.csv rows first.
        assert_eq!(records[0].station, "Gucheng");
        assert_eq!(records[4].station, "Wanliu");
    }

    #[tokio::test]
    async fn test_empty_directory_yields_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let records = ConcurrentReader::new(2)
            .read_directory(dir.path())
            .await
            .unwrap();
        assert!(records.is_empty());
    }
}

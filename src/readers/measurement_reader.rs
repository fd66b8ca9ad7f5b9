use crate::error::{ProcessingError, Result};
use crate::models::RawMeasurement;
use crate::utils::constants::REQUIRED_COLUMNS;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Reads hourly measurement rows from a single station CSV file.
pub struct MeasurementReader {
    strict_validation: bool,
}

impl MeasurementReader {
    pub fn new() -> Self {
        Self {
            strict_validation: false,
        }
    }

    pub fn with_strict_validation(strict_validation: bool) -> Self {
        Self { strict_validation }
    }

    /// Read every row of one CSV file.
    ///
    /// The header row is checked against the required column set before any
    /// row is parsed; a missing column is fatal. Rows that fail to parse are
    /// dropped and counted, matching the drop-not-impute policy for bad
    /// values. Extra columns (row ids, wind direction) are ignored.
    pub fn read_measurements(&self, path: &Path) -> Result<Vec<RawMeasurement>> {
        let file = File::open(path)?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));

        self.check_schema(path, reader.headers()?)?;

        let mut records = Vec::new();
        let mut malformed = 0usize;

        for row in reader.deserialize() {
            match row {
                Ok(record) => {
                    let record: RawMeasurement = record;
                    if self.strict_validation {
                        record.validate_physical()?;
                    }
                    records.push(record);
                }
                Err(_) => malformed += 1,
            }
        }

        if malformed > 0 {
            debug!(
                "{}: dropped {} malformed rows ({} parsed)",
                path.display(),
                malformed,
                records.len()
            );
        }

        Ok(records)
    }

    /// A required column absent from the header is a schema violation, not a
    /// value to default.
    fn check_schema(&self, path: &Path, headers: &csv::StringRecord) -> Result<()> {
        for required in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header.trim() == *required) {
                return Err(ProcessingError::MissingColumn {
                    column: required.to_string(),
                    path: path.display().to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for MeasurementReader {
    fn default() -> Self {
        Self::new()
    }
}

use crate::error::{ApiError, Result};
use crate::models::Observation;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::warn;
use validator::Validate;

/// Reads measurement CSV files with the header `station,date,prcp,tobs`.
///
/// An empty `prcp` field is read as missing precipitation.
pub struct ObservationReader {
    skip_invalid: bool,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self {
            skip_invalid: false,
        }
    }

    /// Log and drop rows that fail validation instead of failing the read.
    pub fn with_skip_invalid(skip_invalid: bool) -> Self {
        Self { skip_invalid }
    }

    pub fn read_observations(&self, path: &Path) -> Result<Vec<Observation>> {
        let file = File::open(path)?;
        self.read_from(file)
    }

    pub fn read_from<R: Read>(&self, source: R) -> Result<Vec<Observation>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        let headers = reader.headers()?.clone();
        let mut observations = Vec::new();
        let mut skipped = 0usize;

        for record_result in reader.records() {
            let record = record_result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let observation: Observation = record.deserialize(Some(&headers))?;

            if let Err(errors) = observation.validate() {
                if self.skip_invalid {
                    warn!("Skipping line {}: {}", line, errors);
                    skipped += 1;
                    continue;
                }
                return Err(ApiError::InvalidObservation {
                    line,
                    message: errors.to_string(),
                });
            }

            observations.push(observation);
        }

        if skipped > 0 {
            warn!("Skipped {} invalid rows", skipped);
        }

        Ok(observations)
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

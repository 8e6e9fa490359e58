use memmap2::Mmap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::models::MeasurementRecord;
use crate::utils::constants::{
    COL_POLLUTANT, COL_RAW_VALUE, COL_SITE_CODE, COL_SITE_NAME, COL_UNIT, COL_VALUE,
    DEFAULT_BUFFER_SIZE,
};

/// Reads a daily measurement export (semicolon-delimited, one header row)
/// into [`MeasurementRecord`]s. Rows with too few columns are skipped;
/// per-row decode problems are logged at debug level and never interrupt
/// the remaining rows.
pub struct MeasurementReader {
    skip_headers: bool,
    use_mmap: bool,
}

impl MeasurementReader {
    pub fn new() -> Self {
        Self {
            skip_headers: true,
            use_mmap: false,
        }
    }

    pub fn with_skip_headers(skip_headers: bool) -> Self {
        Self {
            skip_headers,
            use_mmap: false,
        }
    }

    /// Memory-map the export instead of buffered reads. Worth it for the
    /// national daily files, which run to hundreds of thousands of rows.
    pub fn with_mmap(use_mmap: bool) -> Self {
        Self {
            skip_headers: true,
            use_mmap,
        }
    }

    pub fn read_measurements(&self, path: &Path) -> Result<Vec<MeasurementRecord>> {
        if self.use_mmap {
            self.read_measurements_mmap(path)
        } else {
            self.read_measurements_buffered(path)
        }
    }

    fn read_measurements_buffered(&self, path: &Path) -> Result<Vec<MeasurementRecord>> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        self.collect_records(self.csv_reader(reader))
    }

    fn read_measurements_mmap(&self, path: &Path) -> Result<Vec<MeasurementRecord>> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        self.collect_records(self.csv_reader(&mmap[..]))
    }

    fn csv_reader<R: std::io::Read>(&self, reader: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(self.skip_headers)
            .flexible(true)
            .from_reader(reader)
    }

    fn collect_records<R: std::io::Read>(
        &self,
        mut csv_reader: csv::Reader<R>,
    ) -> Result<Vec<MeasurementRecord>> {
        let mut records = Vec::new();

        for row in csv_reader.records() {
            let record = match row {
                Ok(record) => record,
                Err(e) => {
                    debug!("Skipping undecodable export row: {}", e);
                    continue;
                }
            };

            if let Some(measurement) = Self::parse_measurement_row(&record) {
                records.push(measurement);
            }
        }

        Ok(records)
    }

    fn parse_measurement_row(record: &csv::StringRecord) -> Option<MeasurementRecord> {
        if record.len() <= COL_UNIT {
            return None; // Skip malformed lines
        }

        Some(MeasurementRecord::new(
            record.get(COL_SITE_CODE)?.trim(),
            record.get(COL_SITE_NAME)?.trim(),
            record.get(COL_POLLUTANT)?.trim(),
            record.get(COL_VALUE)?.trim(),
            record.get(COL_RAW_VALUE)?.trim(),
            record.get(COL_UNIT)?.trim(),
        ))
    }
}

impl Default for MeasurementReader {
    fn default() -> Self {
        Self::new()
    }
}

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{ProcessingError, Result};
use crate::models::{CoordinateRegistry, Coordinates};
use crate::utils::constants::{
    COL_REGISTRY_LATITUDE, COL_REGISTRY_LONGITUDE, COL_REGISTRY_SITE_CODE,
};

/// Reads the station coordinates file (comma-delimited, one header row,
/// columns `Station ID, Latitude, Longitude[, ...]`). Only the first three
/// columns are consulted, so both the bare and the enriched registry files
/// are accepted.
pub struct RegistryReader {
    skip_headers: bool,
}

impl RegistryReader {
    pub fn new() -> Self {
        Self { skip_headers: true }
    }

    pub fn with_skip_headers(skip_headers: bool) -> Self {
        Self { skip_headers }
    }

    /// Load the registry. An absent or unreadable file is fatal for the
    /// whole run and reported as `MissingInput`.
    pub fn read_registry(&self, path: &Path) -> Result<CoordinateRegistry> {
        let file = File::open(path).map_err(|e| {
            ProcessingError::MissingInput(format!(
                "station coordinates file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(self.skip_headers)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut registry = CoordinateRegistry::new();
        for row in csv_reader.records() {
            let record = row?;
            if record.len() <= COL_REGISTRY_LONGITUDE {
                continue; // Skip malformed lines
            }

            let station_id = record
                .get(COL_REGISTRY_SITE_CODE)
                .unwrap_or_default()
                .trim()
                .to_string();
            if station_id.is_empty() {
                continue;
            }

            registry.insert(
                station_id,
                Coordinates::new(
                    record.get(COL_REGISTRY_LATITUDE).unwrap_or_default().trim(),
                    record
                        .get(COL_REGISTRY_LONGITUDE)
                        .unwrap_or_default()
                        .trim(),
                ),
            );
        }

        Ok(registry)
    }
}

impl Default for RegistryReader {
    fn default() -> Self {
        Self::new()
    }
}

use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::models::StationMap;

/// One line of the processed report.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    id: &'a str,
    name: &'a str,
    pollutant: &'a str,
    mean: f64,
    median: f64,
    stdev: f64,
    min: f64,
    max: f64,
    unit: &'a str,
    note: u8,
}

/// Serializes the final station map: comma-delimited, one header row, one
/// row per (station, pollutant) pair, stations in first-seen order and
/// pollutants within a station in first-seen order.
pub struct ReportWriter;

impl ReportWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, stations: &StationMap, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        for station in stations.iter() {
            for stats in station.pollutants() {
                // Entries exist only for pollutants with accepted values,
                // and the calculator has run by the time we are called.
                let Some(summary) = stats.summary() else {
                    continue;
                };

                writer.serialize(ReportRow {
                    id: &station.id,
                    name: &station.name,
                    pollutant: stats.code(),
                    mean: summary.mean,
                    median: summary.median,
                    stdev: summary.stdev,
                    min: summary.min,
                    max: summary.max,
                    unit: stats.unit(),
                    note: stats.grade().map(|g| g.note()).unwrap_or(0),
                })?;
            }
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

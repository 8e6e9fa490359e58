use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{ProcessingError, Result};

/// One row of a processed report, read back for inspection.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessedRow {
    pub id: String,
    pub name: String,
    pub pollutant: String,
    pub mean: f64,
    pub median: f64,
    pub stdev: f64,
    pub min: f64,
    pub max: f64,
    pub unit: String,
    pub note: u8,
}

#[derive(Debug)]
pub struct ReportStatistics {
    pub total_rows: usize,
    pub unique_stations: usize,
    pub unique_pollutants: usize,
    /// Rows per note value; index 0 counts ungraded pollutants.
    pub grade_distribution: [usize; 7],
    pub worst: Vec<ProcessedRow>,
}

impl ReportStatistics {
    pub fn worst_note(&self) -> Option<u8> {
        (1u8..=6).rev().find(|&n| self.grade_distribution[n as usize] > 0)
    }

    pub fn ungraded_rows(&self) -> usize {
        self.grade_distribution[0]
    }

    pub fn summary(&self) -> String {
        let distribution = (0..=6)
            .map(|n| format!("{}:{}", n, self.grade_distribution[n]))
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            "Stations: {}\n\
            Pollutants: {}\n\
            Rows: {}\n\
            Notes (0 = ungraded): {}",
            self.unique_stations, self.unique_pollutants, self.total_rows, distribution
        )
    }

    pub fn detailed_summary(&self) -> String {
        let worst = match self.worst_note() {
            None => "No graded pollutants".to_string(),
            Some(note) => {
                let rows = self
                    .worst
                    .iter()
                    .map(|r| format!("- {} ({}): {}", r.name, r.id, r.pollutant))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("Worst note {} held by:\n{}", note, rows)
            }
        };

        format!("{}\n\n{}", self.summary(), worst)
    }
}

/// Summarizes an existing `*_processed.csv` report for the `info` command.
pub struct ReportAnalyzer;

impl ReportAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, path: &Path) -> Result<ReportStatistics> {
        let rows = self.read_rows(path)?;

        if rows.is_empty() {
            return Err(ProcessingError::InvalidFormat(format!(
                "no rows in processed report {}",
                path.display()
            )));
        }

        let mut stations = HashSet::new();
        let mut pollutants = HashSet::new();
        let mut grade_distribution = [0usize; 7];

        for row in &rows {
            stations.insert(row.id.clone());
            pollutants.insert(row.pollutant.clone());
            if let Some(count) = grade_distribution.get_mut(row.note as usize) {
                *count += 1;
            }
        }

        let worst_note = (1..=6u8).rev().find(|&n| grade_distribution[n as usize] > 0);
        let worst = match worst_note {
            None => Vec::new(),
            Some(note) => rows.iter().filter(|r| r.note == note).cloned().collect(),
        };

        Ok(ReportStatistics {
            total_rows: rows.len(),
            unique_stations: stations.len(),
            unique_pollutants: pollutants.len(),
            grade_distribution,
            worst,
        })
    }

    /// The first `limit` rows, for sample display.
    pub fn read_sample(&self, path: &Path, limit: usize) -> Result<Vec<ProcessedRow>> {
        Ok(self.read_rows(path)?.into_iter().take(limit).collect())
    }

    fn read_rows(&self, path: &Path) -> Result<Vec<ProcessedRow>> {
        let file = File::open(path)?;
        let mut csv_reader = csv::Reader::from_reader(BufReader::new(file));

        let mut rows = Vec::new();
        for row in csv_reader.deserialize() {
            rows.push(row?);
        }
        Ok(rows)
    }
}

impl Default for ReportAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_report() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "id,name,pollutant,mean,median,stdev,min,max,unit,note").unwrap();
        writeln!(
            file,
            "FR02021,Paris Centre,O3,15.0,15.0,7.071,10.0,20.0,µg-m3,1"
        )
        .unwrap();
        writeln!(
            file,
            "FR02021,Paris Centre,CO2,405.0,405.0,7.071,400.0,410.0,ppm,0"
        )
        .unwrap();
        writeln!(
            file,
            "FR24023,Lyon Sud,PM10,160.0,160.0,0.0,160.0,160.0,µg-m3,6"
        )
        .unwrap();
        file
    }

    #[test]
    fn test_analyze_counts() -> Result<()> {
        let file = sample_report();
        let stats = ReportAnalyzer::new().analyze(file.path())?;

        assert_eq!(stats.total_rows, 3);
        assert_eq!(stats.unique_stations, 2);
        assert_eq!(stats.unique_pollutants, 3);
        assert_eq!(stats.grade_distribution[0], 1);
        assert_eq!(stats.grade_distribution[1], 1);
        assert_eq!(stats.grade_distribution[6], 1);
        assert_eq!(stats.ungraded_rows(), 1);

        Ok(())
    }

    #[test]
    fn test_worst_entries() -> Result<()> {
        let file = sample_report();
        let stats = ReportAnalyzer::new().analyze(file.path())?;

        assert_eq!(stats.worst_note(), Some(6));
        assert_eq!(stats.worst.len(), 1);
        assert_eq!(stats.worst[0].pollutant, "PM10");

        Ok(())
    }

    #[test]
    fn test_summary_renders() -> Result<()> {
        let file = sample_report();
        let stats = ReportAnalyzer::new().analyze(file.path())?;

        let summary = stats.detailed_summary();
        assert!(summary.contains("Stations: 2"));
        assert!(summary.contains("Worst note 6"));

        Ok(())
    }

    #[test]
    fn test_read_sample_limits_rows() -> Result<()> {
        let file = sample_report();
        let rows = ReportAnalyzer::new().read_sample(file.path(), 2)?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].pollutant, "O3");

        Ok(())
    }

    #[test]
    fn test_empty_report_is_invalid() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "id,name,pollutant,mean,median,stdev,min,max,unit,note").unwrap();

        let result = ReportAnalyzer::new().analyze(file.path());
        assert!(result.is_err());
    }
}

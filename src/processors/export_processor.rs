use std::path::Path;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::CoordinateRegistry;
use crate::processors::aggregator::FileAggregator;
use crate::processors::grading_engine::GradingEngine;
use crate::processors::stats_calculator::StatsCalculator;
use crate::readers::MeasurementReader;
use crate::utils::filename::processed_sibling;
use crate::writers::ReportWriter;

/// Ties the pipeline together for one export file: read rows, aggregate
/// per station, compute statistics, grade, write the sibling
/// `<input>_processed.csv` report.
///
/// The coordinate registry is loaded once at construction and reused for
/// every subsequent file of the run; aggregation state never survives a
/// single `process` call.
pub struct ExportProcessor {
    registry: CoordinateRegistry,
    reader: MeasurementReader,
    calculator: StatsCalculator,
    engine: GradingEngine,
}

impl ExportProcessor {
    /// Fails with `MissingInput` when the registry cannot be loaded; this
    /// is the only fatal error of the pipeline.
    pub fn new(registry_path: &Path) -> Result<Self> {
        Ok(Self::from_registry(CoordinateRegistry::load(registry_path)?))
    }

    pub fn from_registry(registry: CoordinateRegistry) -> Self {
        Self {
            registry,
            reader: MeasurementReader::new(),
            calculator: StatsCalculator::new(),
            engine: GradingEngine::new(),
        }
    }

    pub fn with_reader(mut self, reader: MeasurementReader) -> Self {
        self.reader = reader;
        self
    }

    pub fn registry(&self) -> &CoordinateRegistry {
        &self.registry
    }

    /// Process one export file and write its report next to it.
    pub fn process(&self, input: &Path) -> Result<()> {
        let records = self.reader.read_measurements(input)?;

        let mut aggregator = FileAggregator::new(&self.registry);
        aggregator.consume_all(&records);
        let (mut stations, report) = aggregator.finish();

        debug!(
            accepted = report.accepted,
            out_of_registry = report.out_of_registry,
            invalid_value = report.invalid_value,
            "Ingested {}",
            input.display()
        );

        for station in stations.iter_mut() {
            self.calculator.compute(station);
            self.engine.compute(station);
        }

        let output = processed_sibling(input);
        ReportWriter::new().write(&stations, &output)?;

        info!(
            "Processed {} ({} stations) -> {}",
            input.display(),
            stations.len(),
            output.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;
    use std::io::Write;
    use tempfile::TempDir;

    fn export_row(site: &str, name: &str, pollutant: &str, raw_value: &str) -> String {
        let mut fields = vec![""; 18];
        fields[crate::utils::constants::COL_SITE_CODE] = site;
        fields[crate::utils::constants::COL_SITE_NAME] = name;
        fields[crate::utils::constants::COL_POLLUTANT] = pollutant;
        fields[crate::utils::constants::COL_RAW_VALUE] = raw_value;
        fields[crate::utils::constants::COL_UNIT] = "µg-m3";
        fields.join(";")
    }

    fn registry() -> CoordinateRegistry {
        let mut registry = CoordinateRegistry::new();
        registry.insert("FR02021", Coordinates::new("48.8566", "2.3522"));
        registry
    }

    #[test]
    fn test_process_writes_sibling_report() -> Result<()> {
        let dir = TempDir::new()?;
        let input = dir.path().join("FR_E2_2022-09-15.csv");
        let mut file = std::fs::File::create(&input)?;
        writeln!(file, "{}", vec!["header"; 18].join(";"))?;
        writeln!(file, "{}", export_row("FR02021", "Paris Centre", "O3", "90"))?;
        writeln!(file, "{}", export_row("FR99999", "Unknown", "O3", "10"))?;

        let processor = ExportProcessor::from_registry(registry());
        processor.process(&input)?;

        let output = dir.path().join("FR_E2_2022-09-15_processed.csv");
        let content = std::fs::read_to_string(output)?;
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(
            lines[0],
            "id,name,pollutant,mean,median,stdev,min,max,unit,note"
        );
        assert_eq!(lines.len(), 2); // header + one graded row
        assert!(lines[1].starts_with("FR02021,Paris Centre,O3,"));
        assert!(lines[1].ends_with(",2")); // O3 max 90 -> band 2

        Ok(())
    }

    #[test]
    fn test_missing_registry_aborts_construction() {
        let result = ExportProcessor::new(Path::new("/nonexistent/coords.csv"));
        assert!(result.is_err());
    }
}

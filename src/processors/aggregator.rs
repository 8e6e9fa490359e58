use crate::models::{CoordinateRegistry, MeasurementRecord, StationMap};
use crate::processors::ingestor::{IngestOutcome, RecordIngestor};

/// Advisory row counters for one input file. Dropped rows are not errors
/// and are surfaced at debug level only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub accepted: usize,
    pub out_of_registry: usize,
    pub invalid_value: usize,
}

impl IngestReport {
    pub fn total(&self) -> usize {
        self.accepted + self.out_of_registry + self.invalid_value
    }
}

/// Owns the station map for exactly one input file. A new aggregator is
/// constructed per file; statistics are never cumulative across files.
pub struct FileAggregator<'a> {
    registry: &'a CoordinateRegistry,
    ingestor: RecordIngestor,
    stations: StationMap,
    report: IngestReport,
}

impl<'a> FileAggregator<'a> {
    pub fn new(registry: &'a CoordinateRegistry) -> Self {
        Self {
            registry,
            ingestor: RecordIngestor::new(),
            stations: StationMap::new(),
            report: IngestReport::default(),
        }
    }

    /// Feed one row through the ingestor.
    pub fn consume(&mut self, record: &MeasurementRecord) {
        match self.ingestor.ingest(record, self.registry, &mut self.stations) {
            IngestOutcome::Accepted => self.report.accepted += 1,
            IngestOutcome::OutOfRegistry => self.report.out_of_registry += 1,
            IngestOutcome::InvalidValue => self.report.invalid_value += 1,
        }
    }

    /// Single sequential pass over a file's records.
    pub fn consume_all(&mut self, records: &[MeasurementRecord]) {
        for record in records {
            self.consume(record);
        }
    }

    pub fn report(&self) -> IngestReport {
        self.report
    }

    /// Hand the per-file state over for statistics and grading.
    pub fn finish(self) -> (StationMap, IngestReport) {
        (self.stations, self.report)
    }
}

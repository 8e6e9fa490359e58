pub mod aggregator;
pub mod export_processor;
pub mod grading_engine;
pub mod ingestor;
pub mod stats_calculator;

pub use aggregator::{FileAggregator, IngestReport};
pub use export_processor::ExportProcessor;
pub use grading_engine::{GradingEngine, DEFAULT_BREAKPOINTS};
pub use ingestor::{IngestOutcome, RecordIngestor};
pub use stats_calculator::StatsCalculator;

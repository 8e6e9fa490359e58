pub mod report_analyzer;

pub use report_analyzer::{ProcessedRow, ReportAnalyzer, ReportStatistics};

use serde::{Deserialize, Serialize};

/// Quality grade of a pollutant at one station, from the regulatory
/// breakpoint table. `Ungraded` marks pollutants outside the table; it is
/// not an error and serializes as note 0 in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    Ungraded,
    Graded(u8),
}

impl Grade {
    /// The `note` column value: 0 for ungraded, 1 (best) to 6 (worst) otherwise.
    pub fn note(&self) -> u8 {
        match self {
            Grade::Ungraded => 0,
            Grade::Graded(n) => *n,
        }
    }
}

/// Descriptive statistics over one pollutant value collection, each rounded
/// to 3 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollutantSummary {
    pub mean: f64,
    pub median: f64,
    pub stdev: f64,
    pub min: f64,
    pub max: f64,
}

/// Accepted values for one (station, pollutant) pair within a single input
/// file, plus the computed summary and grade once the calculator and the
/// grading engine have run.
///
/// The value list is allocated fresh per instance; entries exist only for
/// pairs with at least one accepted value.
#[derive(Debug, Clone)]
pub struct PollutantStats {
    code: String,
    values: Vec<f64>,
    unit: String,
    summary: Option<PollutantSummary>,
    grade: Option<Grade>,
}

impl PollutantStats {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            values: Vec::new(),
            unit: String::new(),
            summary: None,
            grade: None,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Append an accepted value. The stored unit is overwritten each time:
    /// last value seen wins, units are not reconciled across readings.
    pub fn record(&mut self, value: f64, unit: &str) {
        self.values.push(value);
        self.unit = unit.to_string();
    }

    /// Accepted values in input row order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn summary(&self) -> Option<&PollutantSummary> {
        self.summary.as_ref()
    }

    pub fn set_summary(&mut self, summary: PollutantSummary) {
        self.summary = Some(summary);
    }

    pub fn grade(&self) -> Option<Grade> {
        self.grade
    }

    pub fn set_grade(&mut self, grade: Grade) {
        self.grade = Some(grade);
    }
}

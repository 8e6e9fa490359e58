use crate::models::{PollutantSummary, Station};

/// Computes descriptive statistics over each pollutant value collection of
/// a station: mean, median, sample standard deviation, min and max, all
/// rounded to 3 decimal places. Deterministic and idempotent for an
/// unchanged value list.
pub struct StatsCalculator;

impl StatsCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(&self, station: &mut Station) {
        for stats in station.pollutants_mut() {
            if let Some(summary) = Self::summarize(stats.values()) {
                stats.set_summary(summary);
            }
        }
    }

    /// Summary of a non-empty value collection; `None` for an empty one
    /// (which cannot occur for an ingested entry).
    pub fn summarize(values: &[f64]) -> Option<PollutantSummary> {
        if values.is_empty() {
            return None;
        }

        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        Some(PollutantSummary {
            mean: round3(mean),
            median: round3(median(values)),
            stdev: round3(sample_stdev(values, mean)),
            min: round3(min),
            max: round3(max),
        })
    }
}

impl Default for StatsCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistical median: middle value for odd counts, mean of the two middle
/// values for even counts.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Sample standard deviation (divisor count - 1); 0 for a single value.
fn sample_stdev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let sum_of_squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_of_squares / (values.len() - 1) as f64).sqrt()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

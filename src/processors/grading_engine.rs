use crate::models::{Grade, PollutantStats, Station};

/// Regulatory breakpoint table: for each graded pollutant, 5 thresholds
/// acting as exclusive upper bounds of bands 1-5; anything at or above the
/// last threshold is band 6. Read-only domain data.
pub const DEFAULT_BREAKPOINTS: [(&str, [f64; 5]); 7] = [
    ("O3", [50.0, 100.0, 130.0, 240.0, 380.0]),
    ("NO", [200.0, 45.0, 600.0, 1150.0, 1700.0]),
    ("NO2", [40.0, 90.0, 120.0, 230.0, 340.0]),
    ("NOX as NO2", [40.0, 90.0, 120.0, 230.0, 340.0]),
    ("SO2", [100.0, 200.0, 350.0, 500.0, 750.0]),
    ("PM2.5", [10.0, 20.0, 25.0, 50.0, 75.0]),
    ("PM10", [20.0, 40.0, 50.0, 100.0, 150.0]),
];

/// Particulate pollutants are graded on their mean; every other graded
/// pollutant on its max.
const PM_POLLUTANTS: [&str; 2] = ["PM2.5", "PM10"];

/// Maps computed statistics to a quality grade per pollutant. The
/// breakpoint table is injected so tests can supply an alternative one.
pub struct GradingEngine {
    breakpoints: &'static [(&'static str, [f64; 5])],
}

impl GradingEngine {
    pub fn new() -> Self {
        Self {
            breakpoints: &DEFAULT_BREAKPOINTS,
        }
    }

    pub fn with_table(breakpoints: &'static [(&'static str, [f64; 5])]) -> Self {
        Self { breakpoints }
    }

    /// Grade every pollutant entry of the station. Each entry is graded at
    /// most once; an already assigned grade is terminal.
    pub fn compute(&self, station: &mut Station) {
        for stats in station.pollutants_mut() {
            if stats.grade().is_some() {
                continue;
            }
            if let Some(grade) = self.grade_entry(stats) {
                stats.set_grade(grade);
            }
        }
    }

    /// The grade for one pollutant entry; `None` when the entry has no
    /// computed summary yet (the calculator runs first).
    fn grade_entry(&self, stats: &PollutantStats) -> Option<Grade> {
        let Some(thresholds) = self.thresholds(stats.code()) else {
            return Some(Grade::Ungraded);
        };

        let summary = stats.summary()?;
        let basis = if Self::is_particulate(stats.code()) {
            summary.mean
        } else {
            summary.max
        };

        Some(Self::band(thresholds, basis))
    }

    fn thresholds(&self, pollutant: &str) -> Option<&[f64; 5]> {
        self.breakpoints
            .iter()
            .find(|(code, _)| *code == pollutant)
            .map(|(_, thresholds)| thresholds)
    }

    fn is_particulate(pollutant: &str) -> bool {
        PM_POLLUTANTS.contains(&pollutant)
    }

    /// The first threshold strictly greater than the basis names the band;
    /// a basis at or above every threshold lands in band 6. Equality with a
    /// threshold falls through to the worse band.
    fn band(thresholds: &[f64; 5], basis: f64) -> Grade {
        for (position, threshold) in thresholds.iter().enumerate() {
            if basis < *threshold {
                return Grade::Graded(position as u8 + 1);
            }
        }
        Grade::Graded(6)
    }
}

impl Default for GradingEngine {
    fn default() -> Self {
        Self::new()
    }
}

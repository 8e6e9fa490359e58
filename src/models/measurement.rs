use serde::{Deserialize, Serialize};

/// One raw row of a daily export, reduced to the fields the engine
/// consults. The value is kept as the raw string: emptiness and
/// parseability are decided at ingestion, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub station_id: String,
    pub station_name: String,
    pub pollutant: String,
    /// Validated value column (unused by aggregation, kept for completeness)
    pub value: String,
    /// Raw value column, the one aggregation consumes; empty means missing
    pub raw_value: String,
    pub unit: String,
}

impl MeasurementRecord {
    pub fn new(
        station_id: impl Into<String>,
        station_name: impl Into<String>,
        pollutant: impl Into<String>,
        value: impl Into<String>,
        raw_value: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            station_id: station_id.into(),
            station_name: station_name.into(),
            pollutant: pollutant.into(),
            value: value.into(),
            raw_value: raw_value.into(),
            unit: unit.into(),
        }
    }
}

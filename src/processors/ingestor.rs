use crate::models::{CoordinateRegistry, MeasurementRecord, Station, StationMap};

/// What became of one raw row. Nothing here is an error: rows outside the
/// registry or without a usable value are simply out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    Accepted,
    OutOfRegistry,
    InvalidValue,
}

/// Normalizes and filters individual measurement rows into the per-file
/// station map. Pure with respect to the registry; its only side effect is
/// mutating the map.
pub struct RecordIngestor;

impl RecordIngestor {
    pub fn new() -> Self {
        Self
    }

    /// Ingest one row:
    /// 1. stations absent from the registry are dropped,
    /// 2. the station entry is created on first contact, with the row's
    ///    display name and the registry's coordinates,
    /// 3. the raw value must be non-empty and parse as a number >= 0,
    /// 4. accepted values are appended to the (station, pollutant) entry,
    ///    created on first occurrence; the unit is overwritten each time.
    pub fn ingest(
        &self,
        record: &MeasurementRecord,
        registry: &CoordinateRegistry,
        station_map: &mut StationMap,
    ) -> IngestOutcome {
        let Some(coordinates) = registry.get(&record.station_id) else {
            return IngestOutcome::OutOfRegistry;
        };

        let station = station_map.get_or_insert_with(&record.station_id, || {
            Station::new(
                record.station_id.clone(),
                record.station_name.clone(),
                coordinates.clone(),
            )
        });

        let Some(value) = Self::parse_value(&record.raw_value) else {
            return IngestOutcome::InvalidValue;
        };

        station
            .pollutant_mut(&record.pollutant)
            .record(value, &record.unit);

        IngestOutcome::Accepted
    }

    fn parse_value(raw_value: &str) -> Option<f64> {
        if raw_value.is_empty() {
            return None;
        }
        let value = raw_value.parse::<f64>().ok()?;
        (value >= 0.0).then_some(value)
    }
}

impl Default for RecordIngestor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    fn registry() -> CoordinateRegistry {
        let mut registry = CoordinateRegistry::new();
        registry.insert("FR02021", Coordinates::new("48.8566", "2.3522"));
        registry
    }

    fn record(station_id: &str, pollutant: &str, raw_value: &str) -> MeasurementRecord {
        MeasurementRecord::new(station_id, "Paris Centre", pollutant, "", raw_value, "µg-m3")
    }

    #[test]
    fn test_accepts_valid_value() {
        let registry = registry();
        let mut map = StationMap::new();
        let ingestor = RecordIngestor::new();

        let outcome = ingestor.ingest(&record("FR02021", "O3", "42.5"), &registry, &mut map);

        assert_eq!(outcome, IngestOutcome::Accepted);
        let station = map.get("FR02021").unwrap();
        assert_eq!(station.pollutant("O3").unwrap().values(), &[42.5]);
        assert_eq!(station.coordinates.latitude, "48.8566");
    }

    #[test]
    fn test_unknown_station_is_dropped_without_creating_an_entry() {
        let registry = registry();
        let mut map = StationMap::new();
        let ingestor = RecordIngestor::new();

        for _ in 0..3 {
            let outcome = ingestor.ingest(&record("FR99999", "O3", "42.5"), &registry, &mut map);
            assert_eq!(outcome, IngestOutcome::OutOfRegistry);
        }

        assert!(map.is_empty());
    }

    #[test]
    fn test_empty_value_is_dropped() {
        let registry = registry();
        let mut map = StationMap::new();
        let ingestor = RecordIngestor::new();

        let outcome = ingestor.ingest(&record("FR02021", "O3", ""), &registry, &mut map);

        assert_eq!(outcome, IngestOutcome::InvalidValue);
        // The station exists (it is in the registry), but no pollutant entry
        let station = map.get("FR02021").unwrap();
        assert_eq!(station.pollutant_count(), 0);
    }

    #[test]
    fn test_negative_value_is_dropped() {
        let registry = registry();
        let mut map = StationMap::new();
        let ingestor = RecordIngestor::new();

        let outcome = ingestor.ingest(&record("FR02021", "O3", "-7.2"), &registry, &mut map);

        assert_eq!(outcome, IngestOutcome::InvalidValue);
        assert!(map.get("FR02021").unwrap().pollutant("O3").is_none());
    }

    #[test]
    fn test_unparseable_value_is_dropped() {
        let registry = registry();
        let mut map = StationMap::new();
        let ingestor = RecordIngestor::new();

        let outcome = ingestor.ingest(&record("FR02021", "O3", "n/a"), &registry, &mut map);

        assert_eq!(outcome, IngestOutcome::InvalidValue);
    }

    #[test]
    fn test_zero_is_a_valid_value() {
        let registry = registry();
        let mut map = StationMap::new();
        let ingestor = RecordIngestor::new();

        let outcome = ingestor.ingest(&record("FR02021", "O3", "0"), &registry, &mut map);

        assert_eq!(outcome, IngestOutcome::Accepted);
        assert_eq!(
            map.get("FR02021").unwrap().pollutant("O3").unwrap().values(),
            &[0.0]
        );
    }

    #[test]
    fn test_unit_overwritten_per_accepted_row() {
        let registry = registry();
        let mut map = StationMap::new();
        let ingestor = RecordIngestor::new();

        let mut first = record("FR02021", "O3", "1.0");
        first.unit = "mg-m3".to_string();
        let mut second = record("FR02021", "O3", "2.0");
        second.unit = "µg-m3".to_string();

        ingestor.ingest(&first, &registry, &mut map);
        ingestor.ingest(&second, &registry, &mut map);

        assert_eq!(
            map.get("FR02021").unwrap().pollutant("O3").unwrap().unit(),
            "µg-m3"
        );
    }
}

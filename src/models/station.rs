use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::models::pollutant::PollutantStats;

/// Station coordinates as published in the registry file. Kept as decimal
/// strings: the engine never computes with them, it only carries them
/// through to the report and the enrichment steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

impl Coordinates {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }
}

/// The whitelist of stations the engine will process: station identifier
/// to coordinates. Loaded once per processor lifetime, immutable after.
#[derive(Debug, Clone, Default)]
pub struct CoordinateRegistry {
    stations: HashMap<String, Coordinates>,
}

impl CoordinateRegistry {
    pub fn new() -> Self {
        Self {
            stations: HashMap::new(),
        }
    }

    /// Load the registry from the comma-delimited coordinates file.
    /// Fails with [`crate::error::ProcessingError::MissingInput`] when the
    /// file is absent or unreadable.
    pub fn load(path: &Path) -> Result<Self> {
        crate::readers::RegistryReader::new().read_registry(path)
    }

    pub fn insert(&mut self, station_id: impl Into<String>, coordinates: Coordinates) {
        self.stations.insert(station_id.into(), coordinates);
    }

    pub fn get(&self, station_id: &str) -> Option<&Coordinates> {
        self.stations.get(station_id)
    }

    pub fn contains(&self, station_id: &str) -> bool {
        self.stations.contains_key(station_id)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// A monitoring station under aggregation: identity plus the per-pollutant
/// value collections in first-seen order.
#[derive(Debug, Clone)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    pollutants: Vec<PollutantStats>,
}

impl Station {
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates,
            pollutants: Vec::new(),
        }
    }

    /// The entry for a pollutant code, created on first occurrence.
    pub fn pollutant_mut(&mut self, code: &str) -> &mut PollutantStats {
        let position = match self.pollutants.iter().position(|p| p.code() == code) {
            Some(i) => i,
            None => {
                self.pollutants.push(PollutantStats::new(code));
                self.pollutants.len() - 1
            }
        };
        &mut self.pollutants[position]
    }

    pub fn pollutant(&self, code: &str) -> Option<&PollutantStats> {
        self.pollutants.iter().find(|p| p.code() == code)
    }

    /// Pollutant entries in first-seen order.
    pub fn pollutants(&self) -> impl Iterator<Item = &PollutantStats> {
        self.pollutants.iter()
    }

    pub fn pollutants_mut(&mut self) -> impl Iterator<Item = &mut PollutantStats> {
        self.pollutants.iter_mut()
    }

    pub fn pollutant_count(&self) -> usize {
        self.pollutants.len()
    }
}

/// Per-file collection of stations, preserving first-seen order for the
/// report. Discarded after each input file.
#[derive(Debug, Default)]
pub struct StationMap {
    index: HashMap<String, usize>,
    stations: Vec<Station>,
}

impl StationMap {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            stations: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn contains(&self, station_id: &str) -> bool {
        self.index.contains_key(station_id)
    }

    pub fn get(&self, station_id: &str) -> Option<&Station> {
        self.index.get(station_id).map(|&i| &self.stations[i])
    }

    /// The station for an identifier, created with `create` on first contact.
    pub fn get_or_insert_with<F>(&mut self, station_id: &str, create: F) -> &mut Station
    where
        F: FnOnce() -> Station,
    {
        let position = match self.index.get(station_id) {
            Some(&i) => i,
            None => {
                self.stations.push(create());
                let i = self.stations.len() - 1;
                self.index.insert(station_id.to_string(), i);
                i
            }
        };
        &mut self.stations[position]
    }

    /// Stations in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Station> {
        self.stations.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords() -> Coordinates {
        Coordinates::new("48.8566", "2.3522")
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = CoordinateRegistry::new();
        registry.insert("FR02021", coords());

        assert!(registry.contains("FR02021"));
        assert!(!registry.contains("FR99999"));
        assert_eq!(registry.get("FR02021").unwrap().latitude, "48.8566");
    }

    #[test]
    fn test_pollutant_created_on_first_occurrence() {
        let mut station = Station::new("FR02021", "Paris Centre", coords());
        assert_eq!(station.pollutant_count(), 0);

        station.pollutant_mut("O3").record(42.0, "µg-m3");
        station.pollutant_mut("O3").record(43.0, "µg-m3");
        station.pollutant_mut("NO2").record(10.0, "µg-m3");

        assert_eq!(station.pollutant_count(), 2);
        assert_eq!(station.pollutant("O3").unwrap().values(), &[42.0, 43.0]);
    }

    #[test]
    fn test_pollutant_order_is_first_seen() {
        let mut station = Station::new("FR02021", "Paris Centre", coords());
        station.pollutant_mut("NO2").record(1.0, "µg-m3");
        station.pollutant_mut("O3").record(2.0, "µg-m3");
        station.pollutant_mut("NO2").record(3.0, "µg-m3");

        let codes: Vec<&str> = station.pollutants().map(|p| p.code()).collect();
        assert_eq!(codes, vec!["NO2", "O3"]);
    }

    #[test]
    fn test_station_map_preserves_insertion_order() {
        let mut map = StationMap::new();
        map.get_or_insert_with("B", || Station::new("B", "Second", coords()));
        map.get_or_insert_with("A", || Station::new("A", "First", coords()));
        map.get_or_insert_with("B", || Station::new("B", "Duplicate", coords()));

        let ids: Vec<&str> = map.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
        // First insertion wins
        assert_eq!(map.get("B").unwrap().name, "Second");
    }

    #[test]
    fn test_value_lists_are_not_shared_between_instances() {
        let mut first = Station::new("A", "First", coords());
        let mut second = Station::new("B", "Second", coords());

        first.pollutant_mut("O3").record(1.0, "µg-m3");
        second.pollutant_mut("O3").record(2.0, "µg-m3");

        assert_eq!(first.pollutant("O3").unwrap().values(), &[1.0]);
        assert_eq!(second.pollutant("O3").unwrap().values(), &[2.0]);
    }
}

use calamine::{open_workbook, Data, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};
use validator::Validate;

use crate::error::{ProcessingError, Result};
use crate::models::Airport;
use crate::utils::constants::AIRPORT_PROXIMITY_KM;
use crate::utils::coordinates::{dms_to_decimal, haversine_distance, parse_coordinate};

/// Tags each registry station with the airports in its vicinity.
///
/// The airport list comes from a reference spreadsheet (name plus DMS
/// coordinates); a cleaned decimal-degree copy is written out as CSV, and
/// the registry file is rewritten with an extra `Airport` column holding
/// the `|`-joined names of every airport within the proximity radius.
pub struct AirportEnricher {
    proximity_km: f64,
}

impl AirportEnricher {
    pub fn new() -> Self {
        Self {
            proximity_km: AIRPORT_PROXIMITY_KM,
        }
    }

    pub fn with_proximity_km(proximity_km: f64) -> Self {
        Self { proximity_km }
    }

    /// Run the whole enrichment: spreadsheet in, cleaned CSV out, registry
    /// rewritten in place with the `Airport` column.
    pub fn enrich(
        &self,
        airports_xlsx: &Path,
        airports_csv: &Path,
        registry_path: &Path,
    ) -> Result<Vec<Airport>> {
        let airports = self.read_spreadsheet(airports_xlsx)?;
        info!("Loaded {} airports from {}", airports.len(), airports_xlsx.display());

        self.write_airports_csv(&airports, airports_csv)?;
        self.tag_stations(&airports, registry_path)?;

        Ok(airports)
    }

    /// Read the airports spreadsheet: first sheet, one header row, columns
    /// name / latitude DMS / longitude DMS. Reading stops at the first row
    /// without a name.
    pub fn read_spreadsheet(&self, path: &Path) -> Result<Vec<Airport>> {
        let mut workbook: Xlsx<BufReader<File>> =
            open_workbook(path).map_err(|e: calamine::XlsxError| ProcessingError::Spreadsheet(e.to_string()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| {
                ProcessingError::Spreadsheet(format!("no sheets in {}", path.display()))
            })?
            .map_err(|e| ProcessingError::Spreadsheet(e.to_string()))?;

        let mut airports = Vec::new();
        for row in range.rows().skip(1) {
            let name = cell_text(row.first());
            if name.is_empty() {
                break;
            }

            let latitude = dms_to_decimal(&cell_text(row.get(1)))?;
            let longitude = dms_to_decimal(&cell_text(row.get(2)))?;

            let airport = Airport::new(name, latitude, longitude);
            airport.validate()?;
            airports.push(airport);
        }

        Ok(airports)
    }

    /// Write the cleaned airport list: `Name, Latitude, Longitude` in
    /// decimal degrees.
    pub fn write_airports_csv(&self, airports: &[Airport], path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["Name", "Latitude", "Longitude"])?;

        for airport in airports {
            writer.write_record([
                airport.name.clone(),
                airport.latitude.to_string(),
                airport.longitude.to_string(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Rewrite the registry file with the `Airport` column appended.
    pub fn tag_stations(&self, airports: &[Airport], registry_path: &Path) -> Result<()> {
        let file = File::open(registry_path).map_err(|e| {
            ProcessingError::MissingInput(format!(
                "station coordinates file {}: {}",
                registry_path.display(),
                e
            ))
        })?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut tagged_rows = Vec::new();
        for row in csv_reader.records() {
            let record = row?;
            if record.len() < 3 {
                continue; // Skip malformed lines
            }

            let station_id = record.get(0).unwrap_or_default().to_string();
            let latitude_text = record.get(1).unwrap_or_default().to_string();
            let longitude_text = record.get(2).unwrap_or_default().to_string();

            let latitude = parse_coordinate(&latitude_text)?;
            let longitude = parse_coordinate(&longitude_text)?;

            let tags = self.nearby_airports(airports, latitude, longitude).join("|");
            debug!("Station {}: airports [{}]", station_id, tags);

            tagged_rows.push([station_id, latitude_text, longitude_text, tags]);
        }

        let mut writer = csv::Writer::from_path(registry_path)?;
        writer.write_record(["Station ID", "Latitude", "Longitude", "Airport"])?;
        for row in &tagged_rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        Ok(())
    }

    /// Names of the airports within the proximity radius of a point.
    pub fn nearby_airports(
        &self,
        airports: &[Airport],
        latitude: f64,
        longitude: f64,
    ) -> Vec<String> {
        airports
            .iter()
            .filter(|airport| {
                haversine_distance(airport.latitude, airport.longitude, latitude, longitude)
                    <= self.proximity_km
            })
            .map(|airport| airport.name.clone())
            .collect()
    }
}

impl Default for AirportEnricher {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) => f.to_string(),
        Some(Data::Int(i)) => i.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn airports() -> Vec<Airport> {
        vec![
            // ~13 km from central Paris
            Airport::new("Paris-Orly".to_string(), 48.7262, 2.3652),
            // ~390 km away
            Airport::new("Lyon-Bron".to_string(), 45.7272, 4.9444),
        ]
    }

    #[test]
    fn test_nearby_airports_within_radius() {
        let enricher = AirportEnricher::new();
        let names = enricher.nearby_airports(&airports(), 48.8566, 2.3522);
        assert_eq!(names, vec!["Paris-Orly".to_string()]);
    }

    #[test]
    fn test_no_airports_when_none_close() {
        let enricher = AirportEnricher::new();
        let names = enricher.nearby_airports(&airports(), 43.2965, 5.3698); // Marseille
        assert!(names.is_empty());
    }

    #[test]
    fn test_radius_is_configurable() {
        let enricher = AirportEnricher::with_proximity_km(500.0);
        let names = enricher.nearby_airports(&airports(), 48.8566, 2.3522);
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_tag_stations_appends_airport_column() -> Result<()> {
        let mut registry = NamedTempFile::new()?;
        writeln!(registry, "Station ID,Latitude,Longitude")?;
        writeln!(registry, "FR02021,48.8566,2.3522")?;
        writeln!(registry, "FR03043,43.2965,5.3698")?;
        registry.flush()?;

        let enricher = AirportEnricher::new();
        enricher.tag_stations(&airports(), registry.path())?;

        let content = std::fs::read_to_string(registry.path())?;
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "Station ID,Latitude,Longitude,Airport");
        assert_eq!(lines[1], "FR02021,48.8566,2.3522,Paris-Orly");
        assert_eq!(lines[2], "FR03043,43.2965,5.3698,");

        Ok(())
    }

    #[test]
    fn test_write_airports_csv() -> Result<()> {
        let file = NamedTempFile::new()?;
        AirportEnricher::new().write_airports_csv(&airports(), file.path())?;

        let content = std::fs::read_to_string(file.path())?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Name,Latitude,Longitude");
        assert!(lines[1].starts_with("Paris-Orly,"));
        assert_eq!(lines.len(), 3);

        Ok(())
    }
}

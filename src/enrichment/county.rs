use reqwest::Client;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{COMMUNES_BASE_URL, DEPARTEMENTS_BASE_URL, HTTP_TIMEOUT_SECS};

#[derive(Debug, Deserialize)]
struct CommuneInfo {
    nom: String,
    #[serde(rename = "codeDepartement")]
    code_departement: String,
}

#[derive(Debug, Deserialize)]
struct DepartementInfo {
    nom: String,
}

/// Resolves each registry station to its city and county through the
/// geo.api.gouv.fr API and writes the fully enriched registry
/// (`stations_coords_processed.csv`). Its existence marks enrichment as
/// done for the run.
pub struct CountyEnricher {
    client: Client,
    communes_url: String,
    departements_url: String,
}

impl CountyEnricher {
    pub fn new() -> Self {
        Self::with_base_urls(COMMUNES_BASE_URL, DEPARTEMENTS_BASE_URL)
    }

    pub fn with_base_urls(
        communes_url: impl Into<String>,
        departements_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
            communes_url: communes_url.into(),
            departements_url: departements_url.into(),
        }
    }

    /// Read the airport-tagged registry, resolve city/county per station,
    /// write the processed registry. Returns the number of stations.
    pub async fn enrich(&self, registry_path: &Path, output_path: &Path) -> Result<usize> {
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

        let mut rows = Vec::new();
        for row in csv_reader.records() {
            let record = row?;
            if record.len() < 3 {
                continue; // Skip malformed lines
            }
            rows.push([
                record.get(0).unwrap_or_default().to_string(),
                record.get(1).unwrap_or_default().to_string(),
                record.get(2).unwrap_or_default().to_string(),
                record.get(3).unwrap_or_default().to_string(),
            ]);
        }

        let mut writer = csv::Writer::from_path(output_path)?;
        writer.write_record([
            "Station ID",
            "Latitude",
            "Longitude",
            "Airport",
            "City",
            "County #",
            "County Name",
        ])?;

        for [station_id, latitude, longitude, airport] in &rows {
            let commune = self.lookup_commune(latitude, longitude).await?;
            let county_name = self.lookup_departement(&commune.code_departement).await?;
            debug!(
                "Station {}: {} ({} {})",
                station_id, commune.nom, commune.code_departement, county_name
            );

            writer.write_record([
                station_id,
                latitude,
                longitude,
                airport,
                &commune.nom,
                &commune.code_departement,
                &county_name,
            ])?;
        }

        writer.flush()?;
        info!(
            "Wrote enriched registry for {} stations to {}",
            rows.len(),
            output_path.display()
        );

        Ok(rows.len())
    }

    fn commune_url(&self, latitude: &str, longitude: &str) -> String {
        format!("{}?lat={}&lon={}", self.communes_url, latitude, longitude)
    }

    async fn lookup_commune(&self, latitude: &str, longitude: &str) -> Result<CommuneInfo> {
        let url = self.commune_url(latitude, longitude);
        let communes: Vec<CommuneInfo> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        communes.into_iter().next().ok_or_else(|| {
            ProcessingError::Geocoding(format!("no commune found at ({}, {})", latitude, longitude))
        })
    }

    async fn lookup_departement(&self, code: &str) -> Result<String> {
        let url = format!("{}/{}", self.departements_url, code);
        let departement: DepartementInfo = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(departement.nom)
    }
}

impl Default for CountyEnricher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commune_url() {
        let enricher =
            CountyEnricher::with_base_urls("https://geo.example/communes", "https://geo.example/departements");
        assert_eq!(
            enricher.commune_url("48.8566", "2.3522"),
            "https://geo.example/communes?lat=48.8566&lon=2.3522"
        );
    }

    #[test]
    fn test_commune_payload_deserialization() {
        let payload = r#"[{"nom":"Paris","code":"75056","codeDepartement":"75"}]"#;
        let communes: Vec<CommuneInfo> = serde_json::from_str(payload).unwrap();
        assert_eq!(communes[0].nom, "Paris");
        assert_eq!(communes[0].code_departement, "75");
    }

    #[test]
    fn test_departement_payload_deserialization() {
        let payload = r#"{"nom":"Paris","code":"75"}"#;
        let departement: DepartementInfo = serde_json::from_str(payload).unwrap();
        assert_eq!(departement.nom, "Paris");
    }
}

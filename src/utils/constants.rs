/// Raw measurement export columns (semicolon-delimited, 0-indexed)
pub const COL_SITE_CODE: usize = 3;
pub const COL_SITE_NAME: usize = 6;
pub const COL_POLLUTANT: usize = 8;
pub const COL_VALUE: usize = 15;
pub const COL_RAW_VALUE: usize = 16;
pub const COL_UNIT: usize = 17;

/// Coordinate registry columns (comma-delimited, 0-indexed)
pub const COL_REGISTRY_SITE_CODE: usize = 0;
pub const COL_REGISTRY_LATITUDE: usize = 1;
pub const COL_REGISTRY_LONGITUDE: usize = 2;

/// File names
pub const REGISTRY_FILE: &str = "stations_coords.csv";
pub const ENRICHED_REGISTRY_FILE: &str = "stations_coords_processed.csv";
pub const AIRPORTS_CSV_FILE: &str = "airports.csv";

/// Daily export naming: FR_E2_{YYYY-MM-DD}.csv
pub const DAILY_EXPORT_PREFIX: &str = "FR_E2_";
pub const PROCESSED_SUFFIX: &str = "_processed";

/// LCSQA real-time archive, one directory per year
pub const ARCHIVE_BASE_URL: &str =
    "https://files.data.gouv.fr/lcsqa/concentrations-de-polluants-atmospheriques-reglementes/temps-reel";

/// Geocoding API
pub const COMMUNES_BASE_URL: &str = "https://geo.api.gouv.fr/communes";
pub const DEPARTEMENTS_BASE_URL: &str = "https://geo.api.gouv.fr/departements";

/// A station is tagged with every airport within this haversine radius
pub const AIRPORT_PROXIMITY_KM: f64 = 18.0;

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const HTTP_TIMEOUT_SECS: u64 = 60;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Invalid date range: {0}")]
    DateRange(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url} (status {status})")]
    Download { url: String, status: u16 },

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

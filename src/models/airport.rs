use serde::{Deserialize, Serialize};
use validator::Validate;

/// An airport from the reference spreadsheet, coordinates already converted
/// to decimal degrees.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Airport {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Airport {
    pub fn new(name: String, latitude: f64, longitude: f64) -> Self {
        Self {
            name,
            latitude,
            longitude,
        }
    }
}

pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{dms_to_decimal, haversine_distance, parse_coordinate};
pub use filename::{daily_export_filename, is_raw_export, processed_sibling};
pub use progress::ProgressReporter;

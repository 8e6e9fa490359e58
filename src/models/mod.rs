pub mod airport;
pub mod measurement;
pub mod pollutant;
pub mod station;

pub use airport::Airport;
pub use measurement::MeasurementRecord;
pub use pollutant::{Grade, PollutantStats, PollutantSummary};
pub use station::{CoordinateRegistry, Coordinates, Station, StationMap};

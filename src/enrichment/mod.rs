pub mod airports;
pub mod county;

pub use airports::AirportEnricher;
pub use county::CountyEnricher;

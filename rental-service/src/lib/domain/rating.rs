pub mod aggregator;
pub mod errors;
pub mod ports;

pub mod repositories;
pub mod telemetry;
pub mod uploads;

pub mod config;
pub mod error;
pub mod progression;
pub mod telemetry;

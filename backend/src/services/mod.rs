//! Services behind the HTTP handlers

pub mod alerts;
pub mod temperature;

pub use alerts::AlertService;
pub use temperature::TemperatureService;

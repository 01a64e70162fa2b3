//! HTTP handlers

pub mod alerts;
pub mod health;
pub mod temperature;
pub mod topography;

pub use alerts::{get_advanced_alerts, get_all_alerts, get_basin_alerts, get_meteorological_alerts};
pub use health::health_check;
pub use temperature::{get_point_temperature, get_region_temperatures};
pub use topography::get_elevation;

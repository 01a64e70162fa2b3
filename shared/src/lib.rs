//! Shared types and alerting engine for the Aysén glacier monitoring platform
//!
//! This crate holds everything that does not touch the network: location
//! registry, weather snapshot model, and the rule-based alerting engine. It is
//! used by the backend server and, through WebAssembly, by the map client.

pub mod alerts;
pub mod models;
pub mod registry;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;

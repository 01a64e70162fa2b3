//! Domain models for glacier hazard monitoring

mod alert;
mod location;
mod weather;

pub use alert::*;
pub use location::*;
pub use weather::*;

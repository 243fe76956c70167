//! Sensor aggregate
//!
//! Sensors are non-human writers bound to one series and authenticated
//! by a static API key.

pub mod model;
pub mod repository;

pub use model::{CreateSensorDto, Sensor};
pub use repository::SensorRepository;

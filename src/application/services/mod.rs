//! Application services

mod measurement;
mod sensor;
mod series;

pub use measurement::{MeasurementService, NewMeasurement};
pub use sensor::SensorService;
pub use series::SeriesService;

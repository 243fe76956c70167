pub mod error;
pub mod measurement;
pub mod repositories;
pub mod sensor;
pub mod series;
pub mod user;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};
pub use measurement::{Measurement, MeasurementFilter};
pub use repositories::RepositoryProvider;
pub use sensor::Sensor;
pub use series::Series;
pub use user::User;

//! Database entities module

pub mod measurement;
pub mod sensor;
pub mod series;
pub mod user;

pub use measurement::Entity as Measurement;
pub use sensor::Entity as Sensor;
pub use series::Entity as Series;
pub use user::Entity as User;

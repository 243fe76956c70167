//! Measurement aggregate

pub mod model;
pub mod repository;

pub use model::{
    parse_series_ids, CreateMeasurementDto, Measurement, MeasurementFilter, UpdateMeasurementDto,
    DEFAULT_LIMIT, MAX_LIMIT,
};
pub use repository::MeasurementRepository;

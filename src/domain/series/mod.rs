//! Series aggregate
//!
//! A series is a named numeric channel with an inclusive valid range.

pub mod model;
pub mod repository;

pub use model::{validate_bounds, CreateSeriesDto, Series, UpdateSeriesDto, DEFAULT_COLOR};
pub use repository::SeriesRepository;

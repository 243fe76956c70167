use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};

/// Result cap applied when the caller does not give one
pub const DEFAULT_LIMIT: u64 = 1000;
/// Largest result cap a caller may request
pub const MAX_LIMIT: u64 = 10_000;

/// Measurement model
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    pub id: i32,
    pub series_id: i32,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    /// `None` for sensor submissions
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct CreateMeasurementDto {
    pub series_id: i32,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateMeasurementDto {
    pub value: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Listing filter. Bounds on `timestamp` are inclusive.
#[derive(Debug, Clone)]
pub struct MeasurementFilter {
    pub series_ids: Option<Vec<i32>>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub limit: u64,
}

impl Default for MeasurementFilter {
    fn default() -> Self {
        Self {
            series_ids: None,
            start: None,
            end: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl MeasurementFilter {
    /// Build a filter from raw query values, enforcing the limit bounds
    pub fn new(
        series_ids: Option<&str>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: Option<i64>,
    ) -> DomainResult<Self> {
        let limit = match limit {
            None => DEFAULT_LIMIT,
            Some(l) if l >= 1 && (l as u64) <= MAX_LIMIT => l as u64,
            Some(_) => {
                return Err(DomainError::Validation(format!(
                    "limit must be between 1 and {}",
                    MAX_LIMIT
                )))
            }
        };

        let series_ids = match series_ids.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_series_ids(raw)?),
        };

        Ok(Self {
            series_ids,
            start,
            end,
            limit,
        })
    }
}

/// Parse a comma-separated list of series IDs, e.g. `"1, 2,3"`
pub fn parse_series_ids(raw: &str) -> DomainResult<Vec<i32>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>()
                .map_err(|_| DomainError::Validation(format!("Invalid series id: {}", s)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_ids() {
        assert_eq!(parse_series_ids("1, 2,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_series_ids("4,").unwrap(), vec![4]);
        assert!(parse_series_ids("1,abc").is_err());
    }

    #[test]
    fn limit_defaults_and_bounds() {
        assert_eq!(
            MeasurementFilter::new(None, None, None, None).unwrap().limit,
            DEFAULT_LIMIT
        );
        assert_eq!(
            MeasurementFilter::new(None, None, None, Some(10_000)).unwrap().limit,
            10_000
        );
        assert!(MeasurementFilter::new(None, None, None, Some(0)).is_err());
        assert!(MeasurementFilter::new(None, None, None, Some(10_001)).is_err());
    }

    #[test]
    fn blank_series_ids_mean_no_filter() {
        let filter = MeasurementFilter::new(Some("  "), None, None, None).unwrap();
        assert!(filter.series_ids.is_none());
    }
}

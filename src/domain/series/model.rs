use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};

pub const DEFAULT_COLOR: &str = "#3B82F6";

/// Series model
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub min_value: f64,
    pub max_value: f64,
    pub color: String,
    pub icon: Option<String>,
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<i32>,
}

impl Series {
    /// Whether `value` lies within `[min_value, max_value]`
    pub fn accepts(&self, value: f64) -> bool {
        self.min_value <= value && value <= self.max_value
    }

    pub fn check_value(&self, value: f64) -> DomainResult<()> {
        if self.accepts(value) {
            Ok(())
        } else {
            Err(DomainError::Validation(format!(
                "Value must be between {} and {}",
                self.min_value, self.max_value
            )))
        }
    }
}

/// `max_value` must be strictly greater than `min_value`
pub fn validate_bounds(min_value: f64, max_value: f64) -> DomainResult<()> {
    if max_value > min_value {
        Ok(())
    } else {
        Err(DomainError::Validation(
            "max_value must be greater than min_value".into(),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct CreateSeriesDto {
    pub name: String,
    pub description: Option<String>,
    pub min_value: f64,
    pub max_value: f64,
    pub color: String,
    pub icon: Option<String>,
    pub unit: String,
    pub created_by: Option<i32>,
}

/// Partial series update. `None` leaves the field untouched; for the
/// nullable fields `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateSeriesDto {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub color: Option<String>,
    pub icon: Option<Option<String>>,
    pub unit: Option<String>,
}

impl UpdateSeriesDto {
    /// Apply the provided fields onto a copy of `series`
    pub fn merge_into(self, series: &Series) -> Series {
        let mut merged = series.clone();
        if let Some(name) = self.name {
            merged.name = name;
        }
        if let Some(description) = self.description {
            merged.description = description;
        }
        if let Some(min_value) = self.min_value {
            merged.min_value = min_value;
        }
        if let Some(max_value) = self.max_value {
            merged.max_value = max_value;
        }
        if let Some(color) = self.color {
            merged.color = color;
        }
        if let Some(icon) = self.icon {
            merged.icon = icon;
        }
        if let Some(unit) = self.unit {
            merged.unit = unit;
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(min_value: f64, max_value: f64) -> Series {
        Series {
            id: 1,
            name: "Temperature".into(),
            description: None,
            min_value,
            max_value,
            color: DEFAULT_COLOR.into(),
            icon: None,
            unit: "°C".into(),
            created_at: Utc::now(),
            created_by: None,
        }
    }

    #[test]
    fn range_is_inclusive() {
        let s = series(0.0, 10.0);
        assert!(s.accepts(0.0));
        assert!(s.accepts(10.0));
        assert!(s.accepts(5.0));
        assert!(!s.accepts(-0.1));
        assert!(!s.accepts(10.5));
        assert!(matches!(s.check_value(15.0), Err(DomainError::Validation(_))));
    }

    #[test]
    fn equal_bounds_are_rejected() {
        assert!(validate_bounds(10.0, 10.0).is_err());
        assert!(validate_bounds(10.0, 5.0).is_err());
        assert!(validate_bounds(0.0, 10.0).is_ok());
    }

    #[test]
    fn merge_clears_nullable_fields_only_when_asked() {
        let mut original = series(0.0, 10.0);
        original.description = Some("old".into());
        original.icon = Some("thermometer".into());

        let untouched = UpdateSeriesDto::default().merge_into(&original);
        assert_eq!(untouched.description.as_deref(), Some("old"));

        let cleared = UpdateSeriesDto {
            description: Some(None),
            ..Default::default()
        }
        .merge_into(&original);
        assert_eq!(cleared.description, None);
        assert_eq!(cleared.icon.as_deref(), Some("thermometer"));
    }

    #[test]
    fn merge_only_touches_provided_fields() {
        let original = series(0.0, 10.0);
        let merged = UpdateSeriesDto {
            min_value: Some(20.0),
            ..Default::default()
        }
        .merge_into(&original);

        assert_eq!(merged.min_value, 20.0);
        assert_eq!(merged.max_value, 10.0);
        assert_eq!(merged.name, original.name);
        assert!(validate_bounds(merged.min_value, merged.max_value).is_err());
    }
}

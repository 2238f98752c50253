//! Coordinate Value Object
//!
//! Latitude/longitude stored as fixed-precision decimals with 8 fractional
//! digits. The mobile client reports plain floats, and reports `0` when it
//! had no GPS fix.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{RoundsError, RoundsResult};

/// Fractional digits kept for stored coordinates
pub const COORDINATE_SCALE: u32 = 8;

/// Which half of a position a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Largest absolute value on this axis, in degrees
    pub const fn limit(&self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        }
    }
}

/// Stored coordinate component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate(Decimal);

impl Coordinate {
    /// Convert a client-reported value for storage
    ///
    /// Missing values, and values that are zero once rounded to the stored
    /// scale, both mean "no fix" and yield `None`.
    pub fn from_reported(axis: Axis, value: Option<f64>) -> RoundsResult<Option<Self>> {
        match value {
            None => Ok(None),
            Some(v) => {
                let coordinate = Self::try_from_f64(axis, v)?;
                Ok((!coordinate.0.is_zero()).then_some(coordinate))
            }
        }
    }

    /// Convert through the shortest decimal representation of `value`
    ///
    /// Rejects non-finite values and values outside the axis range.
    pub fn try_from_f64(axis: Axis, value: f64) -> RoundsResult<Self> {
        if !value.is_finite() {
            return Err(RoundsError::InvalidCoordinate(format!(
                "{} is not finite: {}",
                axis.as_str(),
                value
            )));
        }

        if value.abs() > axis.limit() {
            return Err(RoundsError::InvalidCoordinate(format!(
                "{} out of range [-{limit}, {limit}]: {}",
                axis.as_str(),
                value,
                limit = axis.limit()
            )));
        }

        let decimal = Decimal::from_str(&value.to_string()).map_err(|e| {
            RoundsError::InvalidCoordinate(format!("{} out of range: {} ({})", axis.as_str(), value, e))
        })?;

        Ok(Self(decimal.round_dp(COORDINATE_SCALE)))
    }

    /// Wrap a stored value
    pub fn from_db(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn into_db(self) -> Decimal {
        self.0
    }

    pub fn to_f64(&self) -> Option<f64> {
        decimal_to_f64(Some(self.0))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored nullable decimal as the nearest float, preserving null
pub fn decimal_to_f64(value: Option<Decimal>) -> Option<f64> {
    value.and_then(|d| d.normalize().to_string().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_zero_are_null() {
        assert_eq!(Coordinate::from_reported(Axis::Latitude, None).unwrap(), None);
        assert_eq!(Coordinate::from_reported(Axis::Latitude, Some(0.0)).unwrap(), None);
        assert_eq!(Coordinate::from_reported(Axis::Longitude, Some(-0.0)).unwrap(), None);
    }

    #[test]
    fn test_values_that_round_to_zero_are_null() {
        assert_eq!(Coordinate::from_reported(Axis::Latitude, Some(1e-9)).unwrap(), None);
        assert_eq!(Coordinate::from_reported(Axis::Longitude, Some(-4e-9)).unwrap(), None);

        let smallest = Coordinate::from_reported(Axis::Latitude, Some(1e-8)).unwrap();
        assert_eq!(smallest.map(|c| c.to_string()), Some("0.00000001".to_string()));
    }

    #[test]
    fn test_axis_bounds() {
        assert!(Coordinate::try_from_f64(Axis::Latitude, 90.0).is_ok());
        assert!(Coordinate::try_from_f64(Axis::Latitude, -90.0).is_ok());
        assert!(Coordinate::try_from_f64(Axis::Longitude, 180.0).is_ok());
        assert!(Coordinate::try_from_f64(Axis::Longitude, -179.9999).is_ok());

        assert!(matches!(
            Coordinate::from_reported(Axis::Latitude, Some(123.456)),
            Err(RoundsError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            Coordinate::try_from_f64(Axis::Latitude, -95.0),
            Err(RoundsError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            Coordinate::from_reported(Axis::Longitude, Some(1234.5)),
            Err(RoundsError::InvalidCoordinate(_))
        ));

        // a valid latitude is still a valid longitude
        assert!(Coordinate::try_from_f64(Axis::Longitude, 123.456).is_ok());
    }

    #[test]
    fn test_reported_value_keeps_decimal_digits() {
        let lat = Coordinate::from_reported(Axis::Latitude, Some(-33.4489)).unwrap().unwrap();
        assert_eq!(lat.to_string(), "-33.4489");
        assert_eq!(lat.to_f64(), Some(-33.4489));
    }

    #[test]
    fn test_rounds_to_eight_digits() {
        let lon = Coordinate::try_from_f64(Axis::Longitude, -70.123456789123).unwrap();
        assert_eq!(lon.as_decimal(), Decimal::from_str("-70.12345679").unwrap());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            Coordinate::try_from_f64(Axis::Latitude, f64::NAN),
            Err(RoundsError::InvalidCoordinate(_))
        ));
        assert!(Coordinate::try_from_f64(Axis::Longitude, f64::INFINITY).is_err());
    }

    #[test]
    fn test_decimal_to_f64_preserves_null() {
        assert_eq!(decimal_to_f64(None), None);
        assert_eq!(
            decimal_to_f64(Some(Decimal::from_str("-33.44890000").unwrap())),
            Some(-33.4489)
        );
    }
}

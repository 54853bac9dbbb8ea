//! Position provider contract.
//!
//! The engine only ever sees one resolved longitude per body per call.
//! Whatever shape a real backend returns is unwrapped by the adapter that
//! implements this trait.

use crate::ephemeris::types::{CelestialBody, TimeReference, UnknownBody};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors loading a recorded longitude table
#[derive(Error, Debug)]
pub enum PositionsError {
    #[error("Invalid positions JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    UnknownBody(#[from] UnknownBody),
}

/// Errors a position provider can report for a single lookup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("No position available for {body}")]
    Unavailable { body: CelestialBody },
    #[error("Ephemeris backend failed for {body}: {message}")]
    Backend { body: CelestialBody, message: String },
    #[error("Provider returned a non-finite longitude for {body}: {value}")]
    NonFinite { body: CelestialBody, value: f64 },
}

/// Source of ecliptic longitudes.
pub trait PositionProvider {
    /// Time-conversion entry point: Gregorian date plus fractional hour to
    /// a Julian Day. Backends with their own calendar routine override this.
    fn julian_day(&self, date: NaiveDate, fractional_hour: f64) -> TimeReference {
        TimeReference::from_julian_day(gregorian_julian_day(date, fractional_hour))
    }

    /// Ecliptic longitude of `body` at `time`, in degrees.
    fn longitude_of(&self, time: TimeReference, body: CelestialBody) -> Result<f64, ProviderError>;
}

impl<P: PositionProvider + ?Sized> PositionProvider for &P {
    fn julian_day(&self, date: NaiveDate, fractional_hour: f64) -> TimeReference {
        (**self).julian_day(date, fractional_hour)
    }

    fn longitude_of(&self, time: TimeReference, body: CelestialBody) -> Result<f64, ProviderError> {
        (**self).longitude_of(time, body)
    }
}

impl<P: PositionProvider + ?Sized> PositionProvider for Box<P> {
    fn julian_day(&self, date: NaiveDate, fractional_hour: f64) -> TimeReference {
        (**self).julian_day(date, fractional_hour)
    }

    fn longitude_of(&self, time: TimeReference, body: CelestialBody) -> Result<f64, ProviderError> {
        (**self).longitude_of(time, body)
    }
}

impl<P: PositionProvider + ?Sized> PositionProvider for Arc<P> {
    fn julian_day(&self, date: NaiveDate, fractional_hour: f64) -> TimeReference {
        (**self).julian_day(date, fractional_hour)
    }

    fn longitude_of(&self, time: TimeReference, body: CelestialBody) -> Result<f64, ProviderError> {
        (**self).longitude_of(time, body)
    }
}

/// Julian Day for a Gregorian calendar date (Meeus, Astronomical Algorithms ch. 7)
pub fn gregorian_julian_day(date: NaiveDate, fractional_hour: f64) -> f64 {
    let (y, m) = if date.month() <= 2 {
        (date.year() as f64 - 1.0, date.month() as f64 + 12.0)
    } else {
        (date.year() as f64, date.month() as f64)
    };
    let d = date.day() as f64 + fractional_hour / 24.0;

    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + d + b - 1524.5
}

/// Provider backed by a fixed longitude table.
///
/// Answers every time reference with the same values. Used to replay
/// recorded vectors and to drive the engine without a native ephemeris.
#[derive(Debug, Clone, Default)]
pub struct FixedPositions {
    longitudes: BTreeMap<CelestialBody, f64>,
}

impl FixedPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, body: CelestialBody, lon: f64) -> Self {
        self.longitudes.insert(body, lon);
        self
    }

    pub fn insert(&mut self, body: CelestialBody, lon: f64) {
        self.longitudes.insert(body, lon);
    }

    pub fn remove(&mut self, body: CelestialBody) -> Option<f64> {
        self.longitudes.remove(&body)
    }

    pub fn len(&self) -> usize {
        self.longitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.longitudes.is_empty()
    }

    /// Parse a JSON object of body name to longitude, e.g. `{"SUN": 10.0}`.
    /// Body names are matched case-insensitively.
    pub fn from_json(json: &str) -> Result<Self, PositionsError> {
        let raw: BTreeMap<String, f64> = serde_json::from_str(json)?;
        let mut positions = Self::new();
        for (name, lon) in raw {
            let body: CelestialBody = name.parse()?;
            positions.insert(body, lon);
        }
        Ok(positions)
    }
}

impl PositionProvider for FixedPositions {
    fn longitude_of(&self, _time: TimeReference, body: CelestialBody) -> Result<f64, ProviderError> {
        self.longitudes
            .get(&body)
            .copied()
            .ok_or(ProviderError::Unavailable { body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_julian_day_j2000() {
        let jd = gregorian_julian_day(date(2000, 1, 1), 12.0);
        assert!((jd - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn test_julian_day_meeus_examples() {
        // Meeus example 7.a: 1957 Oct 4.81
        let jd = gregorian_julian_day(date(1957, 10, 4), 0.81 * 24.0);
        assert!((jd - 2_436_116.31).abs() < 1e-6);
        // 1987 Jan 27, 0h
        let jd = gregorian_julian_day(date(1987, 1, 27), 0.0);
        assert!((jd - 2_446_822.5).abs() < 1e-9);
    }

    #[test]
    fn test_julian_day_is_monotonic_in_time() {
        let a = gregorian_julian_day(date(1999, 12, 31), 23.5);
        let b = gregorian_julian_day(date(2000, 1, 1), 0.0);
        assert!(a < b);
    }

    #[test]
    fn test_fixed_positions_missing_body() {
        let provider = FixedPositions::new().with(CelestialBody::Sun, 10.0);
        let t = TimeReference::from_julian_day(2_451_545.0);
        assert_eq!(provider.longitude_of(t, CelestialBody::Sun), Ok(10.0));
        assert_eq!(
            provider.longitude_of(t, CelestialBody::Moon),
            Err(ProviderError::Unavailable { body: CelestialBody::Moon })
        );
    }

    #[test]
    fn test_fixed_positions_from_json() {
        let provider = FixedPositions::from_json(r#"{"sun": 10.5, "MOON": 200.0}"#).unwrap();
        assert_eq!(provider.len(), 2);
        assert!(matches!(
            FixedPositions::from_json(r#"{"PLUTO": 1.0}"#),
            Err(PositionsError::UnknownBody(UnknownBody(name))) if name == "PLUTO"
        ));
        assert!(matches!(
            FixedPositions::from_json("not json"),
            Err(PositionsError::Json(_))
        ));
        assert!(matches!(
            FixedPositions::from_json(r#"{"SUN": "east"}"#),
            Err(PositionsError::Json(_))
        ));
    }

    #[test]
    fn test_blanket_impls_forward() {
        let provider = Arc::new(FixedPositions::new().with(CelestialBody::Mars, 42.0));
        let t = TimeReference::from_julian_day(0.0);
        let by_ref = &provider;
        assert_eq!(by_ref.longitude_of(t, CelestialBody::Mars), Ok(42.0));
        let boxed: Box<dyn PositionProvider> = Box::new(FixedPositions::new());
        assert!(boxed.longitude_of(t, CelestialBody::Mars).is_err());
    }
}

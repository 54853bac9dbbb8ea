use crate::ephemeris::provider::{PositionProvider, ProviderError};
use crate::ephemeris::types::{normalize_degrees, CelestialBody, TimeReference};
use chrono::{Datelike, NaiveDate};
use std::env;
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, julday, set_ephe_path};
use thiserror::Error;

/// Errors raised while setting up the Swiss Ephemeris backend
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
}

/// Default location of the Swiss Ephemeris data files
pub const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

// FLG_SWIEPH: use Swiss Ephemeris files
const FLG_SWIEPH: u32 = 2;
// GREG_CAL
const GREG_CAL: i32 = 1;

/// Swiss Ephemeris planet code for a body
fn swiss_code(body: CelestialBody) -> u32 {
    match body {
        CelestialBody::Sun => 0,
        CelestialBody::Moon => 1,
        CelestialBody::Mercury => 2,
        CelestialBody::Venus => 3,
        CelestialBody::Mars => 4,
        CelestialBody::Jupiter => 5,
        CelestialBody::Saturn => 6,
    }
}

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

/// Explicit path, then `SWISS_EPHEMERIS_PATH`, then the default
fn resolve_ephemeris_path(explicit: Option<PathBuf>, env_path: Option<String>) -> PathBuf {
    explicit
        .or_else(|| env_path.filter(|p| !p.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
}

impl SwissEphemerisAdapter {
    /// Create a new adapter and point the backend at its data files. The
    /// path falls back to `SWISS_EPHEMERIS_PATH`, then to
    /// [`DEFAULT_EPHEMERIS_PATH`].
    ///
    /// The backend's data path is process-wide: the most recently created
    /// adapter decides where every adapter reads from.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = resolve_ephemeris_path(ephemeris_path, env::var("SWISS_EPHEMERIS_PATH").ok());

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        set_ephe_path(&path.to_string_lossy());
        log::debug!("Swiss Ephemeris data path set to {}", path.display());
        Ok(Self { ephemeris_path: path })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

impl PositionProvider for SwissEphemerisAdapter {
    fn julian_day(&self, date: NaiveDate, fractional_hour: f64) -> TimeReference {
        let jd = julday(
            date.year(),
            date.month() as i32,
            date.day() as i32,
            fractional_hour,
            GREG_CAL,
        );
        TimeReference::from_julian_day(jd)
    }

    fn longitude_of(&self, time: TimeReference, body: CelestialBody) -> Result<f64, ProviderError> {
        let jd = time.julian_day();
        let result = calc_ut(jd, swiss_code(body), FLG_SWIEPH).map_err(|e| {
            ProviderError::Backend {
                body,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        // calc_ut yields [lon, lat, dist, speed_lon, speed_lat, speed_dist];
        // only the longitude crosses the provider boundary.
        let longitude = result.out[0];
        log::debug!("calc_ut jd={} {} -> {}", jd, body, longitude);
        if !longitude.is_finite() {
            return Err(ProviderError::NonFinite { body, value: longitude });
        }
        Ok(normalize_degrees(longitude))
    }
}

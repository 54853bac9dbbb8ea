#[cfg(feature = "swiss-ephemeris")]
pub mod adapter;
pub mod provider;
pub mod types;

#[cfg(feature = "swiss-ephemeris")]
pub use adapter::{EphemerisError, SwissEphemerisAdapter, DEFAULT_EPHEMERIS_PATH};
pub use provider::{gregorian_julian_day, FixedPositions, PositionProvider, PositionsError, ProviderError};
pub use types::{normalize_degrees, CelestialBody, TimeReference, UnknownBody};

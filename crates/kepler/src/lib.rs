//! Natal vector and aspect analysis.
//!
//! A birth date and time are normalized to a Julian Day, seven ecliptic
//! longitudes are read from a [`PositionProvider`], every pair of bodies is
//! classified against the canonical aspect angles and the first hit drives
//! a narrative directive.

pub mod aspects;
pub mod consult;
pub mod directive;
pub mod engine;
pub mod ephemeris;
pub mod error;
pub mod geo;
pub mod time;
pub mod vectors;

pub use aspects::{AspectAnalyzer, AspectHit, AspectKind, BodyPair};
pub use consult::{ConsultRequest, Consultation};
pub use directive::{select_directive, Directive};
pub use engine::{compute_with_timeout, NatalEngine, NatalInput, NatalReport};
pub use ephemeris::{
    CelestialBody, FixedPositions, PositionProvider, PositionsError, ProviderError, TimeReference, UnknownBody,
};
pub use error::EngineError;
pub use geo::{GeoLocation, GeoResolver, KnownPlaceResolver, ResolvedPlace};
pub use vectors::{build_position_vector, PositionVector};

#[cfg(feature = "swiss-ephemeris")]
pub use ephemeris::SwissEphemerisAdapter;

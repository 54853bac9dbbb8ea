//! Vector table builder.

use crate::ephemeris::{normalize_degrees, CelestialBody, PositionProvider, ProviderError, TimeReference};
use crate::error::EngineError;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Complete longitude table, one value per body, each in [0, 360).
///
/// There is no partially populated state: a vector either holds all seven
/// bodies or is never built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionVector {
    longitudes: [f64; CelestialBody::COUNT],
}

impl PositionVector {
    /// Build from longitudes given in declared body order. Values are
    /// normalized into [0, 360).
    pub fn from_longitudes(longitudes: [f64; CelestialBody::COUNT]) -> Self {
        Self {
            longitudes: longitudes.map(normalize_degrees),
        }
    }

    pub fn get(&self, body: CelestialBody) -> f64 {
        self.longitudes[body.index()]
    }

    /// (body, longitude) in declared order
    pub fn iter(&self) -> impl Iterator<Item = (CelestialBody, f64)> + '_ {
        CelestialBody::ALL.iter().map(move |body| (*body, self.get(*body)))
    }
}

impl Serialize for PositionVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CelestialBody::COUNT))?;
        for (body, lon) in self.iter() {
            map.serialize_entry(body.name(), &lon)?;
        }
        map.end()
    }
}

/// Round to `places` decimal places, ties to the even digit.
///
/// Decided on the exact binary value, so 0.125 rounds to 0.12 while 2.675
/// (stored just below the tie) rounds to 2.67. Scaling by a power of ten
/// first would lose that distinction.
pub(crate) fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

/// Query the provider for every body in declared order.
///
/// Fail-fast: the first failing body aborts the whole table.
pub fn build_position_vector<P: PositionProvider + ?Sized>(
    time: TimeReference,
    provider: &P,
) -> Result<PositionVector, EngineError> {
    let mut longitudes = [0.0; CelestialBody::COUNT];

    for body in CelestialBody::ALL {
        let raw = provider
            .longitude_of(time, body)
            .map_err(|source| EngineError::ProviderFailure { body, source })?;

        if !raw.is_finite() {
            return Err(EngineError::ProviderFailure {
                body,
                source: ProviderError::NonFinite { body, value: raw },
            });
        }

        // Rounding 359.99996 gives 360.0, so normalize again afterwards
        longitudes[body.index()] = normalize_degrees(round_to(normalize_degrees(raw), 4));
    }

    Ok(PositionVector { longitudes })
}

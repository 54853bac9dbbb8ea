use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed set of bodies the engine reads longitudes for.
///
/// Declaration order is part of the public contract: it drives pair
/// enumeration and the canonical labelling of every aspect hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CelestialBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
}

impl CelestialBody {
    /// All bodies in declared order
    pub const ALL: [CelestialBody; 7] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
    ];

    /// Number of bodies in the canonical set
    pub const COUNT: usize = Self::ALL.len();

    /// Position in declared order (0-based)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wire name: "SUN", "MOON", ...
    pub fn name(self) -> &'static str {
        match self {
            CelestialBody::Sun => "SUN",
            CelestialBody::Moon => "MOON",
            CelestialBody::Mercury => "MERCURY",
            CelestialBody::Venus => "VENUS",
            CelestialBody::Mars => "MARS",
            CelestialBody::Jupiter => "JUPITER",
            CelestialBody::Saturn => "SATURN",
        }
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A name that matches none of the bodies
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown body: {0}")]
pub struct UnknownBody(pub String);

impl FromStr for CelestialBody {
    type Err = UnknownBody;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CelestialBody::ALL
            .iter()
            .copied()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownBody(s.to_string()))
    }
}

/// Astronomical time scalar (Julian Day, UT).
///
/// Produced by the time normalizer through a provider's time-conversion
/// entry point and handed back to the same provider for lookups.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeReference(f64);

impl TimeReference {
    pub fn from_julian_day(jd: f64) -> Self {
        Self(jd)
    }

    pub fn julian_day(self) -> f64 {
        self.0
    }
}

/// Normalize a longitude to [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

use crate::ephemeris::CelestialBody;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::fmt;

/// Tolerance applied to every canonical angle, in degrees
pub const ORB_MAX: f64 = 5.0;

/// The five canonical angle categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

/// Canonical angles in ascending order; classification walks this table
pub const ASPECT_TABLE: [AspectKind; 5] = [
    AspectKind::Conjunction,
    AspectKind::Sextile,
    AspectKind::Square,
    AspectKind::Trine,
    AspectKind::Opposition,
];

impl AspectKind {
    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "CONJUNCTION",
            AspectKind::Sextile => "SEXTILE",
            AspectKind::Square => "SQUARE",
            AspectKind::Trine => "TRINE",
            AspectKind::Opposition => "OPPOSITION",
        }
    }

    /// Narrative label used by the directive template
    pub fn label(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Energy Singularity",
            AspectKind::Sextile => "Operational Opportunity",
            AspectKind::Square => "Structural Tension",
            AspectKind::Trine => "Expansion Flow",
            AspectKind::Opposition => "Contrast Point",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Two distinct bodies, always stored in declared order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyPair {
    first: CelestialBody,
    second: CelestialBody,
}

impl BodyPair {
    /// Canonicalize: the earlier body in declared order comes first.
    /// Returns `None` when both bodies are the same.
    pub fn new(a: CelestialBody, b: CelestialBody) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { first: a, second: b }),
            std::cmp::Ordering::Greater => Some(Self { first: b, second: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn first(&self) -> CelestialBody {
        self.first
    }

    pub fn second(&self) -> CelestialBody {
        self.second
    }
}

impl fmt::Display for BodyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

impl Serialize for BodyPair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.first, self.second].serialize(serializer)
    }
}

/// One classified pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectHit {
    pub pair: BodyPair,
    /// Circular distance, rounded to 2 decimals
    pub distance_deg: f64,
    pub kind: AspectKind,
}

impl Serialize for AspectHit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("AspectHit", 4)?;
        s.serialize_field("pair", &self.pair)?;
        s.serialize_field("distanceDeg", &self.distance_deg)?;
        s.serialize_field("type", self.kind.type_name())?;
        s.serialize_field("label", self.kind.label())?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_ascending() {
        let angles: Vec<f64> = ASPECT_TABLE.iter().map(|k| k.angle()).collect();
        assert_eq!(angles, vec![0.0, 60.0, 90.0, 120.0, 180.0]);
    }

    #[test]
    fn test_orb_below_half_min_spacing() {
        let min_spacing = ASPECT_TABLE
            .windows(2)
            .map(|w| w[1].angle() - w[0].angle())
            .fold(f64::INFINITY, f64::min);
        assert!(ORB_MAX < min_spacing / 2.0);
    }

    #[test]
    fn test_body_pair_canonical() {
        let pair = BodyPair::new(CelestialBody::Saturn, CelestialBody::Sun).unwrap();
        assert_eq!(pair.first(), CelestialBody::Sun);
        assert_eq!(pair.second(), CelestialBody::Saturn);
        assert_eq!(pair.to_string(), "SUN-SATURN");
        assert_eq!(pair, BodyPair::new(CelestialBody::Sun, CelestialBody::Saturn).unwrap());
        assert!(BodyPair::new(CelestialBody::Moon, CelestialBody::Moon).is_none());
    }

    #[test]
    fn test_hit_serialization() {
        let hit = AspectHit {
            pair: BodyPair::new(CelestialBody::Sun, CelestialBody::Moon).unwrap(),
            distance_deg: 90.0,
            kind: AspectKind::Square,
        };
        let value = serde_json::to_value(hit).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "pair": ["SUN", "MOON"],
                "distanceDeg": 90.0,
                "type": "SQUARE",
                "label": "Structural Tension"
            })
        );
    }
}

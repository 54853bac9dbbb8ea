use crate::aspects::types::{AspectHit, AspectKind, BodyPair, ASPECT_TABLE, ORB_MAX};
use crate::ephemeris::{normalize_degrees, CelestialBody};
use crate::vectors::{round_to, PositionVector};

/// Minimal circular distance between two longitudes, in [0, 180]
pub fn angular_distance(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (normalize_degrees(lon1) - normalize_degrees(lon2)).abs();
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

/// First canonical angle (ascending) whose orb contains `distance`.
/// Boundaries are inclusive.
pub fn classify(distance: f64) -> Option<AspectKind> {
    ASPECT_TABLE
        .iter()
        .copied()
        .find(|kind| (distance - kind.angle()).abs() <= ORB_MAX)
}

/// Aspect analyzer
pub struct AspectAnalyzer;

impl AspectAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Classify a single pair of bodies. The hit is labelled in declared
    /// order whatever order the bodies are passed in.
    pub fn analyze_pair(
        &self,
        vector: &PositionVector,
        a: CelestialBody,
        b: CelestialBody,
    ) -> Option<AspectHit> {
        let pair = BodyPair::new(a, b)?;
        let distance = angular_distance(vector.get(pair.first()), vector.get(pair.second()));
        classify(distance).map(|kind| AspectHit {
            pair,
            distance_deg: round_to(distance, 2),
            kind,
        })
    }

    /// Visit all 21 pairs (i < j, declared order) and collect the hits in
    /// enumeration order.
    pub fn analyze(&self, vector: &PositionVector) -> Vec<AspectHit> {
        let bodies = CelestialBody::ALL;
        let mut hits = Vec::new();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                if let Some(hit) = self.analyze_pair(vector, bodies[i], bodies[j]) {
                    hits.push(hit);
                }
            }
        }
        hits
    }
}

impl Default for AspectAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

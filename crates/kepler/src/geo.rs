//! Place resolution.
//!
//! The resolved coordinates are carried alongside a report; they never
//! enter the aspect math.

use serde::{Deserialize, Serialize};

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    /// Neutral coordinate returned when a place cannot be resolved
    pub const NEUTRAL: GeoLocation = GeoLocation { lat: 0.0, lon: 0.0 };
}

/// Result of a lookup; `fallback` marks the neutral sentinel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlace {
    #[serde(flatten)]
    pub location: GeoLocation,
    pub fallback: bool,
}

impl ResolvedPlace {
    pub fn found(location: GeoLocation) -> Self {
        Self {
            location,
            fallback: false,
        }
    }

    pub fn neutral() -> Self {
        Self {
            location: GeoLocation::NEUTRAL,
            fallback: true,
        }
    }
}

/// Free text to coordinates. Implementations never fail: an unknown place
/// resolves to [`ResolvedPlace::neutral`].
pub trait GeoResolver {
    fn resolve(&self, place: &str) -> ResolvedPlace;
}

/// Known places bundled with the resolver
const BUILTIN_PLACES: &[(&str, f64, f64)] = &[
    ("SAN FRANCISCO", 37.7749, -122.4194),
    ("BARRANQUILLA", 10.9685, -74.7813),
    ("NEW YORK", 40.7128, -74.0060),
    ("CARMELO", -34.0000, -58.2833),
];

#[derive(Debug, Clone, PartialEq)]
struct KnownPlace {
    // Upper-cased for matching
    key: String,
    location: GeoLocation,
}

/// Offline resolver over a table of known place names.
///
/// A place matches when its name appears anywhere in the query, ignoring
/// case; the first table entry that matches wins.
#[derive(Debug, Clone)]
pub struct KnownPlaceResolver {
    places: Vec<KnownPlace>,
}

impl KnownPlaceResolver {
    /// Resolver with the built-in table only
    pub fn new() -> Self {
        let places = BUILTIN_PLACES
            .iter()
            .map(|(name, lat, lon)| KnownPlace {
                key: name.to_string(),
                location: GeoLocation { lat: *lat, lon: *lon },
            })
            .collect();
        Self { places }
    }

    /// Append an entry after the existing ones. Blank names are ignored.
    pub fn with_place(mut self, name: &str, location: GeoLocation) -> Self {
        let key = name.trim().to_uppercase();
        if !key.is_empty() {
            self.places.push(KnownPlace { key, location });
        }
        self
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl Default for KnownPlaceResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoResolver for KnownPlaceResolver {
    fn resolve(&self, place: &str) -> ResolvedPlace {
        let query = place.trim().to_uppercase();
        if query.is_empty() {
            return ResolvedPlace::neutral();
        }
        self.places
            .iter()
            .find(|known| query.contains(&known.key))
            .map(|known| ResolvedPlace::found(known.location))
            .unwrap_or_else(|| {
                log::debug!("No known place matches {:?}", place);
                ResolvedPlace::neutral()
            })
    }
}

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default deadline for a whole engine run
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceEntry {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeplerSettings {
    /// Swiss Ephemeris data directory; `None` lets the adapter decide
    pub ephemeris_path: Option<PathBuf>,
    pub provider_timeout: Duration,
    /// Extra known places, matched after the built-in table
    pub places: Vec<PlaceEntry>,
    /// File the settings were read from, if any
    pub source: Option<PathBuf>,
}

impl Default for KeplerSettings {
    fn default() -> Self {
        Self {
            ephemeris_path: None,
            provider_timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
            places: Vec::new(),
            source: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProviderToml {
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

impl Default for ProviderToml {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_PROVIDER_TIMEOUT_MS
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlaceToml {
    name: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    provider: ProviderToml,
    #[serde(default)]
    places: Vec<PlaceToml>,
}

/// Relative locations tried when no explicit config path is given
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["configs/kepler.toml", "../../configs/kepler.toml"];

/// Try the common relative paths for `configs/kepler.toml`.
/// Returns `None` when none of them exists.
pub fn find_default_config() -> Option<PathBuf> {
    DEFAULT_CONFIG_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// Parse settings from TOML text
pub fn parse_settings(text: &str) -> anyhow::Result<KeplerSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse kepler settings: {e}"))?;
    let RootConfigToml {
        ephemeris,
        provider,
        places,
    } = root;

    if provider.timeout_ms == 0 {
        anyhow::bail!("provider.timeout_ms must be greater than zero");
    }

    let mut entries = Vec::with_capacity(places.len());
    for place in places {
        let name = place.name.trim().to_string();
        if name.is_empty() {
            anyhow::bail!("places entries need a non-empty name");
        }
        if !(-90.0..=90.0).contains(&place.lat) || !(-180.0..=180.0).contains(&place.lon) {
            anyhow::bail!(
                "place {:?} has out-of-range coordinates ({}, {})",
                name,
                place.lat,
                place.lon
            );
        }
        entries.push(PlaceEntry {
            name,
            lat: place.lat,
            lon: place.lon,
        });
    }

    Ok(KeplerSettings {
        ephemeris_path: ephemeris.path,
        provider_timeout: Duration::from_millis(provider.timeout_ms),
        places: entries,
        source: None,
    })
}

/// Load settings from an explicit file
pub fn load_settings_from(path: &Path) -> anyhow::Result<KeplerSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read config file {}", path.display()))?;
    let mut settings =
        parse_settings(&text).with_context(|| format!("Invalid config file {}", path.display()))?;
    settings.source = Some(path.to_path_buf());
    Ok(settings)
}

/// Load settings from `explicit` if given, otherwise from the first default
/// location that exists, otherwise defaults.
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<KeplerSettings> {
    match explicit {
        Some(path) => load_settings_from(path),
        None => match find_default_config() {
            Some(path) => load_settings_from(&path),
            None => Ok(KeplerSettings::default()),
        },
    }
}

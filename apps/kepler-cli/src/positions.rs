//! Position source selection for the CLI.

use anyhow::Context;
use kepler::{FixedPositions, PositionProvider};
use kepler_config::KeplerSettings;
use std::fs;
use std::path::Path;

pub(crate) type DynProvider = Box<dyn PositionProvider + Send + Sync>;

/// Load a recorded longitude table (`{"SUN": 10.0, ...}`)
pub(crate) fn load_fixed_positions(path: &Path) -> anyhow::Result<FixedPositions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read positions file {}", path.display()))?;
    FixedPositions::from_json(&text)
        .with_context(|| format!("Invalid positions file {}", path.display()))
}

/// A recorded table wins; otherwise the Swiss Ephemeris backend when it is
/// compiled in.
pub(crate) fn select_provider(
    positions: Option<&Path>,
    settings: &KeplerSettings,
) -> anyhow::Result<DynProvider> {
    if let Some(path) = positions {
        let table = load_fixed_positions(path)?;
        log::info!("Using recorded positions from {} ({} bodies)", path.display(), table.len());
        return Ok(Box::new(table));
    }
    swiss_provider(settings)
}

#[cfg(feature = "swiss-ephemeris")]
fn swiss_provider(settings: &KeplerSettings) -> anyhow::Result<DynProvider> {
    let adapter = kepler::SwissEphemerisAdapter::new(settings.ephemeris_path.clone())
        .context("Failed to init Swiss Ephemeris adapter")?;
    log::info!("Using Swiss Ephemeris data at {}", adapter.ephemeris_path().display());
    Ok(Box::new(adapter))
}

#[cfg(not(feature = "swiss-ephemeris"))]
fn swiss_provider(_settings: &KeplerSettings) -> anyhow::Result<DynProvider> {
    anyhow::bail!(
        "No position source: pass --positions <file.json> or build with the `swiss-ephemeris` feature"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kepler::{CelestialBody, TimeReference};
    use std::io::Write;

    #[test]
    fn test_positions_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"SUN": 12.5, "MOON": 99.0}}"#).unwrap();
        let provider = select_provider(Some(file.path()), &KeplerSettings::default()).unwrap();
        let t = TimeReference::from_julian_day(2_451_545.0);
        assert_eq!(provider.longitude_of(t, CelestialBody::Sun), Ok(12.5));
        assert!(provider.longitude_of(t, CelestialBody::Mars).is_err());
    }

    #[test]
    fn test_bad_positions_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"VULCAN": 1.0}}"#).unwrap();
        let err = select_provider(Some(file.path()), &KeplerSettings::default())
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<kepler::PositionsError>(),
            Some(kepler::PositionsError::UnknownBody(_))
        ));
    }
}

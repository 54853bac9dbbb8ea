use kepler::ephemeris::gregorian_julian_day;
use kepler::time::parse_moment;
use kepler::{build_position_vector, CelestialBody, FixedPositions, PositionProvider};

#[test]
fn test_fixed_positions_json_builds_full_vector() {
    let json = r#"{
        "SUN": 238.9, "MOON": 61.25, "MERCURY": 221.0, "VENUS": 272.4,
        "MARS": 193.6, "JUPITER": 308.7, "SATURN": 233.1
    }"#;
    let provider = FixedPositions::from_json(json).unwrap();
    let moment = parse_moment("1985-11-21", Some("03:09")).unwrap();
    let time = provider.julian_day(moment.date, moment.fractional_hour());

    let vector = build_position_vector(time, &provider).unwrap();
    assert_eq!(vector.get(CelestialBody::Moon), 61.25);
    assert_eq!(vector.iter().count(), 7);
}

#[test]
fn test_default_time_conversion_matches_meeus() {
    let provider = FixedPositions::new();
    let moment = parse_moment("2000-01-01", Some("12:00")).unwrap();
    let time = provider.julian_day(moment.date, moment.fractional_hour());
    assert_eq!(time.julian_day(), gregorian_julian_day(moment.date, 12.0));
    assert!((time.julian_day() - 2_451_545.0).abs() < 1e-9);
}

#[cfg(feature = "swiss-ephemeris")]
mod swiss {
    use kepler::{CelestialBody, NatalEngine, NatalInput, SwissEphemerisAdapter};

    #[test]
    #[ignore] // Requires Swiss Ephemeris files
    fn test_swiss_full_pipeline() {
        let adapter = SwissEphemerisAdapter::new(None).unwrap();
        let engine = NatalEngine::new(adapter);
        let report = engine
            .compute(&NatalInput::new("2000-01-01", Some("12:00")))
            .unwrap();
        // Sun near 280.4 at J2000
        let sun = report.vectors.get(CelestialBody::Sun);
        assert!((sun - 280.4).abs() < 0.5, "sun at {sun}");
    }
}

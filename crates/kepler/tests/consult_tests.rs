use kepler::{
    CelestialBody, ConsultRequest, Consultation, FixedPositions, GeoLocation, KnownPlaceResolver,
    NatalEngine,
};
use std::sync::Arc;
use std::time::Duration;

fn full_table() -> FixedPositions {
    FixedPositions::new()
        .with(CelestialBody::Sun, 0.0)
        .with(CelestialBody::Moon, 39.0)
        .with(CelestialBody::Mercury, 67.0)
        .with(CelestialBody::Venus, 105.0)
        .with(CelestialBody::Mars, 112.0)
        .with(CelestialBody::Jupiter, 145.0)
        .with(CelestialBody::Saturn, 211.0)
}

fn request(place: &str) -> ConsultRequest {
    ConsultRequest {
        date: "1980-01-01".to_string(),
        time: None,
        place: place.to_string(),
    }
}

#[test]
fn test_success_record_carries_geo_and_directive() {
    let engine = NatalEngine::new(full_table());
    let resolver = KnownPlaceResolver::new();
    let consultation = Consultation::run(&engine, &resolver, &request("san francisco, ca"));

    let record = consultation.to_record();
    assert_eq!(record["status"], "success");
    assert_eq!(record["geo"]["lat"], 37.7749);
    assert_eq!(record["geo"]["fallback"], false);
    assert_eq!(record["vectors"].as_object().unwrap().len(), 7);
    assert_eq!(record["aspectHits"].as_array().unwrap().len(), 0);
    assert!(record["directive"].as_str().unwrap().starts_with("EXPANSION NODE ACTIVE"));
}

#[test]
fn test_unknown_place_does_not_change_math() {
    let engine = NatalEngine::new(full_table());
    let resolver = KnownPlaceResolver::new()
        .with_place("Montevideo", GeoLocation { lat: -34.9011, lon: -56.1645 });

    let known = Consultation::run(&engine, &resolver, &request("Montevideo"));
    let unknown = Consultation::run(&engine, &resolver, &request("Nowhere Special"));

    assert!(!known.place.fallback);
    assert!(unknown.place.fallback);
    assert_eq!(known.outcome.unwrap(), unknown.outcome.unwrap());
}

#[tokio::test]
async fn test_run_with_timeout_success() {
    let engine = Arc::new(NatalEngine::new(full_table()));
    let resolver = KnownPlaceResolver::new();
    let consultation = Consultation::run_with_timeout(
        engine,
        &resolver,
        &request("Carmelo, Uruguay"),
        Duration::from_secs(5),
    )
    .await;
    assert!(consultation.is_success());
    assert_eq!(consultation.place.location.lat, -34.0);
}

use std::collections::HashSet;

use time::macros::datetime;

use aisid_core::clock::FixedClock;
use aisid_core::demo::{parse_incidents_json, sample_incidents, seeded_store};
use aisid_core::domain::Category;
use aisid_core::ids::UuidIdGenerator;

#[test]
fn sample_set_parses_with_unique_ids_and_sane_timestamps() {
    let incidents = sample_incidents().expect("sample parses");
    assert!(incidents.len() >= 8, "expected a meaningful sample set");

    let ids: HashSet<&str> = incidents.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids.len(), incidents.len());

    for inc in &incidents {
        assert!(inc.updated >= inc.created, "{}: updated < created", inc.id);
        assert!(!inc.affected_systems.is_empty(), "{}: no systems", inc.id);
        assert!(!inc.title.trim().is_empty());
        assert!(!inc.reported_by.trim().is_empty());
    }
}

#[test]
fn sample_set_covers_every_category() {
    let incidents = sample_incidents().expect("sample parses");
    for category in Category::ALL {
        assert!(
            incidents.iter().any(|i| i.category == category),
            "missing category {category}"
        );
    }
}

#[test]
fn seeded_store_keeps_fixture_order() {
    let store = seeded_store(
        FixedClock::new(datetime!(2024-06-01 00:00 UTC)),
        UuidIdGenerator,
    )
    .expect("seed");
    let expected = sample_incidents().unwrap();
    assert_eq!(store.list_all(), expected.as_slice());
}

#[test]
fn malformed_sample_is_a_structured_error() {
    let err = parse_incidents_json(r#"[{"id": "x"}]"#).unwrap_err();
    assert_eq!(err.code, "SEED_PARSE_FAILED");

    let err = parse_incidents_json(
        r#"[{"id":"x","title":"t","description":"d","date":"2024-01-01T00:00:00Z",
            "severity":"urgent","category":"bias","status":"open","affectedSystems":["a"],
            "reportedBy":"r","created":"2024-01-01T00:00:00Z","updated":"2024-01-01T00:00:00Z"}]"#,
    )
    .unwrap_err();
    assert_eq!(err.code, "SEED_PARSE_FAILED");
}

#[test]
fn optional_fields_are_absent_rather_than_empty() {
    let incidents = sample_incidents().unwrap();
    let translation = incidents
        .iter()
        .find(|i| i.id == "inc-2024-002")
        .expect("fixture record");
    assert_eq!(translation.location, None);
    assert_eq!(translation.mitigation, None);

    let json = serde_json::to_value(translation).unwrap();
    assert!(json.get("location").is_none());
    assert_eq!(json["affectedSystems"][0], "translation-service");
}

use pretty_assertions::assert_eq;
use time::macros::datetime;

use aisid_core::clock::FixedClock;
use aisid_core::config::DashboardConfig;
use aisid_core::domain::{Incident, Severity, Status};
use aisid_core::filter::{FilterPatch, FilterSpec, SortDirection, SortKey};
use aisid_core::session::DashboardSession;
use aisid_core::validate::IncidentDraft;

fn session() -> (DashboardSession, FixedClock) {
    let clock = FixedClock::new(datetime!(2024-06-01 09:00 UTC));
    let config = DashboardConfig {
        id_prefix: Some("NEW".to_string()),
        ..DashboardConfig::default()
    };
    let session = DashboardSession::from_config(&config, clock.clone()).expect("session");
    (session, clock)
}

fn draft(title: &str) -> IncidentDraft {
    IncidentDraft {
        title: title.to_string(),
        description: "Reported via dashboard".to_string(),
        date: "2024-05-31T22:00:00Z".to_string(),
        severity: Severity::Critical,
        reported_by: "Ops".to_string(),
        affected_systems: vec!["gateway".to_string()],
        ..IncidentDraft::default()
    }
}

#[test]
fn submit_creates_and_stats_follow_the_full_collection() {
    let (mut session, _clock) = session();
    let before = session.stats();

    session.set_filter(FilterPatch::severity(Some(Severity::Low)));
    let created = session.submit(&draft("Gateway returned other tenants' data")).unwrap();

    assert_eq!(created.id, "NEW-0001");
    assert_eq!(created.created, datetime!(2024-06-01 09:00 UTC));
    assert_eq!(session.store().list_all()[0].id, created.id);

    // Stats ignore the active filter.
    let after = session.stats();
    assert_eq!(after.total, before.total + 1);
    assert_eq!(after.by_severity.critical, before.by_severity.critical + 1);
    assert!(session.visible().iter().all(|i| i.severity == Severity::Low));
}

#[test]
fn invalid_submit_stores_nothing() {
    let (mut session, _clock) = session();
    let total = session.store().len();

    let err = session.submit(&IncidentDraft::default()).unwrap_err();
    assert_eq!(err.code, "VALIDATION_FAILED");
    assert_eq!(session.store().len(), total);
}

#[test]
fn set_filter_merges_and_reset_restores_start_up_filters() {
    let (mut session, _clock) = session();
    session.set_filter(FilterPatch::search("model"));
    session.set_filter(FilterPatch::status(Some(Status::Resolved)));
    session.toggle_sort_direction();

    assert_eq!(session.filters().search, "model");
    assert_eq!(session.filters().status, Some(Status::Resolved));
    assert_eq!(session.filters().sort_direction, SortDirection::Asc);
    assert!(session
        .visible()
        .iter()
        .all(|i| i.status == Status::Resolved));

    session.reset_filters();
    assert_eq!(session.filters(), &FilterSpec::default());
    assert_eq!(session.visible().len(), session.store().len());
}

#[test]
fn update_through_session_refreshes_updated() {
    let (mut session, clock) = session();
    let target = session.store().list_all()[0].clone();

    clock.set(datetime!(2024-06-02 10:00 UTC));
    let saved = session
        .update(Incident {
            status: Status::Resolved,
            mitigation: Some("Cache partitioned per tenant".to_string()),
            ..target.clone()
        })
        .unwrap();

    assert_eq!(saved.created, target.created);
    assert_eq!(saved.updated, datetime!(2024-06-02 10:00 UTC));
    assert_eq!(session.store().get(&target.id), Some(&saved));
}

#[test]
fn selection_follows_store_and_clears_on_delete() {
    let (mut session, _clock) = session();
    let id = session.store().list_all()[1].id.clone();

    session.select(&id).unwrap();
    assert_eq!(session.selected().map(|i| i.id.as_str()), Some(id.as_str()));

    assert!(session.select("nope").unwrap_err().is_not_found());
    assert_eq!(session.selected().map(|i| i.id.as_str()), Some(id.as_str()));

    session.clear_selection();
    assert!(session.selected().is_none());
    assert_eq!(session.store().len(), 8, "closing the detail view keeps the record");

    session.select(&id).unwrap();
    session.delete(&id).unwrap();
    assert!(session.selected().is_none());
    assert!(session.delete(&id).unwrap_err().is_not_found());
}

#[test]
fn config_without_seed_starts_empty_with_configured_sort() {
    let config = DashboardConfig {
        seed_demo: false,
        default_sort_by: SortKey::Severity,
        default_sort_direction: SortDirection::Asc,
        id_prefix: None,
    };
    let session =
        DashboardSession::from_config(&config, FixedClock::new(datetime!(2024-06-01 00:00 UTC)))
            .unwrap();

    assert!(session.store().is_empty());
    assert_eq!(session.filters().sort_by, SortKey::Severity);
    assert_eq!(session.stats().total, 0);
}

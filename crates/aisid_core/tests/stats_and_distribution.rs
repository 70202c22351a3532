use pretty_assertions::assert_eq;
use time::macros::datetime;

use aisid_core::analytics::{
    build_dashboard_payload, build_distribution, compute_stats, IncidentStats,
    DASHBOARD_PAYLOAD_VERSION,
};
use aisid_core::demo::sample_incidents;
use aisid_core::domain::{Category, Incident, Severity, Status};

fn incident(id: usize, severity: Severity, category: Category, status: Status) -> Incident {
    let ts = datetime!(2024-01-01 00:00 UTC);
    Incident {
        id: format!("inc-{id}"),
        title: format!("Incident {id}"),
        description: "desc".to_string(),
        date: ts,
        severity,
        category,
        status,
        affected_systems: vec!["svc".to_string()],
        reported_by: "tester".to_string(),
        location: None,
        impact: None,
        mitigation: None,
        created: ts,
        updated: ts,
    }
}

fn assert_reconciles(stats: &IncidentStats) {
    assert_eq!(stats.by_status.sum(), stats.total, "status counts");
    assert_eq!(stats.by_severity.sum(), stats.total, "severity counts");
    assert_eq!(stats.by_category.sum(), stats.total, "category counts");
}

#[test]
fn empty_collection_has_zero_counts_and_no_division_by_zero() {
    let stats = compute_stats(&[]);
    assert_eq!(stats, IncidentStats::default());
    assert_reconciles(&stats);

    let dist = build_distribution(&[]);
    assert_eq!(dist.severity.len(), 4);
    assert_eq!(dist.category.len(), 7);
    for bucket in dist.severity.iter().chain(dist.category.iter()) {
        assert_eq!(bucket.count, 0);
        assert_eq!(bucket.width_pct, 0.0);
        assert!(bucket.width_pct.is_finite());
    }
}

#[test]
fn derived_counts_follow_status_and_severity() {
    let incidents = vec![
        incident(1, Severity::Critical, Category::Security, Status::Open),
        incident(2, Severity::High, Category::Bias, Status::Investigating),
        incident(3, Severity::Low, Category::Bias, Status::Resolved),
        incident(4, Severity::Medium, Category::HarmfulContent, Status::Closed),
        incident(5, Severity::Critical, Category::Other, Status::Open),
    ];
    let stats = compute_stats(&incidents);

    assert_eq!(stats.total, 5);
    assert_eq!(stats.active_incidents, 3);
    assert_eq!(stats.high_priority_incidents, 3);
    assert_eq!(stats.by_severity.critical, 2);
    assert_eq!(stats.by_category.bias, 2);
    assert_eq!(stats.by_category.harmful_content, 1);
    assert_eq!(stats.by_status.closed, 1);
    assert_reconciles(&stats);
}

#[test]
fn counts_reconcile_for_every_mix() {
    let mut incidents = Vec::new();
    let mut n = 0;
    for severity in Severity::ALL {
        for category in Category::ALL {
            for status in Status::ALL {
                n += 1;
                if n % 3 != 0 {
                    incidents.push(incident(n, severity, category, status));
                }
            }
            assert_reconciles(&compute_stats(&incidents));
        }
    }
}

#[test]
fn distribution_is_normalized_against_group_maximum() {
    let incidents = vec![
        incident(1, Severity::Critical, Category::Privacy, Status::Open),
        incident(2, Severity::Critical, Category::Privacy, Status::Open),
        incident(3, Severity::Critical, Category::Privacy, Status::Open),
        incident(4, Severity::Critical, Category::Privacy, Status::Open),
        incident(5, Severity::Low, Category::Bias, Status::Open),
    ];
    let dist = build_distribution(&incidents);

    let severity = dist
        .severity
        .iter()
        .map(|b| (b.label.as_str(), b.count, b.width_pct))
        .collect::<Vec<_>>();
    assert_eq!(
        severity,
        vec![
            ("Critical", 4, 100.0),
            ("High", 0, 0.0),
            ("Medium", 0, 0.0),
            ("Low", 1, 25.0),
        ]
    );

    let keys = dist.category.iter().map(|b| b.key.as_str()).collect::<Vec<_>>();
    assert_eq!(
        keys,
        vec![
            "category:bias",
            "category:misinformation",
            "category:privacy",
            "category:security",
            "category:harmful-content",
            "category:system-manipulation",
            "category:other",
        ]
    );
    assert_eq!(dist.category[2].width_pct, 100.0);
    assert_eq!(dist.category[0].width_pct, 25.0);
}

#[test]
fn sample_data_dashboard_payload() {
    let incidents = sample_incidents().expect("sample");
    let payload = build_dashboard_payload(&incidents);

    assert_eq!(payload.version, DASHBOARD_PAYLOAD_VERSION);
    assert_eq!(payload.stats.total, 8);
    assert_eq!(payload.stats.active_incidents, 3);
    assert_eq!(payload.stats.high_priority_incidents, 5);
    assert_reconciles(&payload.stats);
    assert_eq!(payload.distribution.severity[1].label, "High");
    assert_eq!(payload.distribution.severity[1].width_pct, 100.0);
}

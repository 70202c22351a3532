// Note: everything here is computed over the full, unfiltered collection.

use serde::{Deserialize, Serialize};

use crate::domain::{Category, Incident, Severity, Status};

pub const DASHBOARD_PAYLOAD_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub open: i64,
    pub investigating: i64,
    pub resolved: i64,
    pub closed: i64,
}

impl StatusCounts {
    pub fn get(&self, status: Status) -> i64 {
        match status {
            Status::Open => self.open,
            Status::Investigating => self.investigating,
            Status::Resolved => self.resolved,
            Status::Closed => self.closed,
        }
    }

    fn bump(&mut self, status: Status) {
        match status {
            Status::Open => self.open += 1,
            Status::Investigating => self.investigating += 1,
            Status::Resolved => self.resolved += 1,
            Status::Closed => self.closed += 1,
        }
    }

    pub fn sum(&self) -> i64 {
        Status::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SeverityCounts {
    pub low: i64,
    pub medium: i64,
    pub high: i64,
    pub critical: i64,
}

impl SeverityCounts {
    pub fn get(&self, severity: Severity) -> i64 {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
            Severity::Critical => self.critical,
        }
    }

    fn bump(&mut self, severity: Severity) {
        match severity {
            Severity::Low => self.low += 1,
            Severity::Medium => self.medium += 1,
            Severity::High => self.high += 1,
            Severity::Critical => self.critical += 1,
        }
    }

    pub fn sum(&self) -> i64 {
        Severity::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCounts {
    pub bias: i64,
    pub misinformation: i64,
    pub privacy: i64,
    pub security: i64,
    pub harmful_content: i64,
    pub system_manipulation: i64,
    pub other: i64,
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> i64 {
        match category {
            Category::Bias => self.bias,
            Category::Misinformation => self.misinformation,
            Category::Privacy => self.privacy,
            Category::Security => self.security,
            Category::HarmfulContent => self.harmful_content,
            Category::SystemManipulation => self.system_manipulation,
            Category::Other => self.other,
        }
    }

    fn bump(&mut self, category: Category) {
        match category {
            Category::Bias => self.bias += 1,
            Category::Misinformation => self.misinformation += 1,
            Category::Privacy => self.privacy += 1,
            Category::Security => self.security += 1,
            Category::HarmfulContent => self.harmful_content += 1,
            Category::SystemManipulation => self.system_manipulation += 1,
            Category::Other => self.other += 1,
        }
    }

    pub fn sum(&self) -> i64 {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Summary widget numbers.
///
/// Invariant: each of `by_status`, `by_severity`, `by_category` sums to `total`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct IncidentStats {
    pub total: i64,
    pub by_status: StatusCounts,
    pub by_severity: SeverityCounts,
    pub by_category: CategoryCounts,
    /// open + investigating
    pub active_incidents: i64,
    /// critical + high
    pub high_priority_incidents: i64,
}

pub fn compute_stats(incidents: &[Incident]) -> IncidentStats {
    let mut by_status = StatusCounts::default();
    let mut by_severity = SeverityCounts::default();
    let mut by_category = CategoryCounts::default();
    let mut active_incidents = 0;
    let mut high_priority_incidents = 0;

    for inc in incidents {
        by_status.bump(inc.status);
        by_severity.bump(inc.severity);
        by_category.bump(inc.category);
        if inc.status.is_active() {
            active_incidents += 1;
        }
        if inc.severity.is_high_priority() {
            high_priority_incidents += 1;
        }
    }

    IncidentStats {
        total: incidents.len() as i64,
        by_status,
        by_severity,
        by_category,
        active_incidents,
        high_priority_incidents,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DistributionBucket {
    pub key: String,
    pub label: String,
    pub count: i64,
    /// Bar width relative to the largest bucket of the same group, 0..=100.
    pub width_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Distribution {
    pub severity: Vec<DistributionBucket>,
    pub category: Vec<DistributionBucket>,
}

fn normalize_group(rows: Vec<(String, String, i64)>) -> Vec<DistributionBucket> {
    // An all-zero group still divides by 1.
    let max = rows.iter().map(|(_, _, c)| *c).max().unwrap_or(0).max(1);
    rows.into_iter()
        .map(|(key, label, count)| DistributionBucket {
            key,
            label,
            count,
            width_pct: count as f64 * 100.0 / max as f64,
        })
        .collect()
}

/// Severity buckets run critical -> low (display order); categories follow declaration order.
pub fn build_distribution(incidents: &[Incident]) -> Distribution {
    let stats = compute_stats(incidents);

    let severity = Severity::ALL
        .iter()
        .rev()
        .map(|s| {
            (
                format!("severity:{}", s.as_str()),
                s.label().to_string(),
                stats.by_severity.get(*s),
            )
        })
        .collect::<Vec<_>>();

    let category = Category::ALL
        .iter()
        .map(|c| {
            (
                format!("category:{}", c.as_str()),
                c.label().to_string(),
                stats.by_category.get(*c),
            )
        })
        .collect::<Vec<_>>();

    Distribution {
        severity: normalize_group(severity),
        category: normalize_group(category),
    }
}

/// Everything the dashboard header needs in one serializable value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardPayload {
    pub version: u32,
    pub stats: IncidentStats,
    pub distribution: Distribution,
}

pub fn build_dashboard_payload(incidents: &[Incident]) -> DashboardPayload {
    DashboardPayload {
        version: DASHBOARD_PAYLOAD_VERSION,
        stats: compute_stats(incidents),
        distribution: build_distribution(incidents),
    }
}

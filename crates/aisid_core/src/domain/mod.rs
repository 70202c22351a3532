use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::AppError;

/// Ordinal urgency of an incident. Declaration order is the ranking (low < critical).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Numeric rank used by the severity sort: low=1, medium=2, high=3, critical=4.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    pub fn is_high_priority(self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Bias,
    Misinformation,
    Privacy,
    Security,
    HarmfulContent,
    SystemManipulation,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Bias,
        Category::Misinformation,
        Category::Privacy,
        Category::Security,
        Category::HarmfulContent,
        Category::SystemManipulation,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Bias => "bias",
            Category::Misinformation => "misinformation",
            Category::Privacy => "privacy",
            Category::Security => "security",
            Category::HarmfulContent => "harmful-content",
            Category::SystemManipulation => "system-manipulation",
            Category::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Bias => "Bias",
            Category::Misinformation => "Misinformation",
            Category::Privacy => "Privacy",
            Category::Security => "Security",
            Category::HarmfulContent => "Harmful Content",
            Category::SystemManipulation => "System Manipulation",
            Category::Other => "Other",
        }
    }
}

/// Lifecycle state. Any status may move to any other; no transition graph is enforced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Open,
    Investigating,
    Resolved,
    Closed,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Open,
        Status::Investigating,
        Status::Resolved,
        Status::Closed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::Investigating => "investigating",
            Status::Resolved => "resolved",
            Status::Closed => "closed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::Investigating => "Investigating",
            Status::Resolved => "Resolved",
            Status::Closed => "Closed",
        }
    }

    /// Open and investigating incidents count as "active" on the dashboard.
    pub fn is_active(self) -> bool {
        matches!(self, Status::Open | Status::Investigating)
    }
}

fn unknown_value(kind: &str, raw: &str) -> AppError {
    AppError::new("DOMAIN_UNKNOWN_VALUE", format!("Unknown {kind}"))
        .with_details(format!("value={raw}"))
}

impl FromStr for Severity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Severity::ALL
            .into_iter()
            .find(|v| v.as_str() == needle)
            .ok_or_else(|| unknown_value("severity", s))
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the display form too ("Harmful Content", "harmful_content").
        let needle = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        Category::ALL
            .into_iter()
            .find(|v| v.as_str() == needle)
            .ok_or_else(|| unknown_value("category", s))
    }
}

impl FromStr for Status {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Status::ALL
            .into_iter()
            .find(|v| v.as_str() == needle)
            .ok_or_else(|| unknown_value("status", s))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logged safety/operational incident.
///
/// Notes:
/// - `id`, `created` and `updated` are owned by the store; callers never choose them.
/// - Timestamps serialize as RFC3339.
/// - Optional narrative fields are `None` when not provided (never empty-string sentinels).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub severity: Severity,
    pub category: Category,
    pub status: Status,
    pub affected_systems: Vec<String>,
    pub reported_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated: OffsetDateTime,
}

/// Everything a caller supplies when logging an incident.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewIncident {
    pub title: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub severity: Severity,
    pub category: Category,
    pub status: Status,
    pub affected_systems: Vec<String>,
    pub reported_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation: Option<String>,
}

impl NewIncident {
    pub(crate) fn into_incident(
        self,
        id: String,
        created: OffsetDateTime,
        updated: OffsetDateTime,
    ) -> Incident {
        Incident {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            severity: self.severity,
            category: self.category,
            status: self.status,
            affected_systems: self.affected_systems,
            reported_by: self.reported_by,
            location: self.location,
            impact: self.impact,
            mitigation: self.mitigation,
            created,
            updated,
        }
    }
}

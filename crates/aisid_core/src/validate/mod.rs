use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Category, NewIncident, Severity, Status};
use crate::error::AppError;
use crate::normalize::timestamps::parse_timestamp;

/// Raw authoring-form state, before validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct IncidentDraft {
    pub title: String,
    pub description: String,
    /// As typed: RFC3339 or `YYYY-MM-DDTHH:MM`.
    pub date: String,
    pub severity: Severity,
    pub category: Category,
    pub status: Status,
    pub reported_by: String,
    pub location: String,
    pub impact: String,
    pub mitigation: String,
    pub affected_systems: Vec<String>,
}

impl Default for IncidentDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            date: String::new(),
            severity: Severity::Medium,
            category: Category::Other,
            status: Status::Open,
            reported_by: String::new(),
            location: String::new(),
            impact: String::new(),
            mitigation: String::new(),
            affected_systems: Vec::new(),
        }
    }
}

/// Field-keyed validation messages (`title`, `date`, `reportedBy`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        let details = serde_json::to_string(&errors).unwrap_or_default();
        AppError::new("VALIDATION_FAILED", "Incident form has invalid fields").with_details(details)
    }
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Check a draft and build the store payload.
///
/// Required: title, description, date, reporter, at least one affected system. Required text is
/// submitted as typed; blank optional fields become `None`.
pub fn validate_draft(draft: &IncidentDraft) -> Result<NewIncident, FieldErrors> {
    let mut errors = FieldErrors::default();

    if draft.title.trim().is_empty() {
        errors.insert("title", "Title is required");
    }
    if draft.description.trim().is_empty() {
        errors.insert("description", "Description is required");
    }
    let date = match parse_timestamp(&draft.date) {
        Ok(Some(dt)) => Some(dt),
        Ok(None) => {
            errors.insert("date", "Date is required");
            None
        }
        Err(_) => {
            errors.insert("date", "Date is not a valid timestamp");
            None
        }
    };
    if draft.reported_by.trim().is_empty() {
        errors.insert("reportedBy", "Reporter name is required");
    }
    if draft.affected_systems.is_empty() {
        errors.insert("affectedSystems", "At least one affected system is required");
    }

    let Some(date) = date.filter(|_| errors.is_empty()) else {
        warn!(fields = ?errors.fields().collect::<Vec<_>>(), "incident draft rejected");
        return Err(errors);
    };

    Ok(NewIncident {
        title: draft.title.clone(),
        description: draft.description.clone(),
        date,
        severity: draft.severity,
        category: draft.category,
        status: draft.status,
        affected_systems: draft.affected_systems.clone(),
        reported_by: draft.reported_by.clone(),
        location: optional_text(&draft.location),
        impact: optional_text(&draft.impact),
        mitigation: optional_text(&draft.mitigation),
    })
}

/// Add a system name to the draft list. Returns false for blank input or a duplicate.
pub fn add_affected_system(systems: &mut Vec<String>, input: &str) -> bool {
    let name = input.trim();
    if name.is_empty() || systems.iter().any(|s| s == name) {
        return false;
    }
    systems.push(name.to_string());
    true
}

pub fn remove_affected_system(systems: &mut Vec<String>, name: &str) -> bool {
    let before = systems.len();
    systems.retain(|s| s != name);
    systems.len() != before
}

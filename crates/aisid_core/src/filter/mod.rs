use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::domain::{Category, Incident, Severity, Status};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Severity,
    Title,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Active search/equality/sort criteria for the incident list.
///
/// `None` on an equality filter means "any value". Defaults: no filters, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    pub search: String,
    pub severity: Option<Severity>,
    pub category: Option<Category>,
    pub status: Option<Status>,
    pub sort_by: SortKey,
    pub sort_direction: SortDirection,
}

/// Partial update of a [`FilterSpec`]. Absent fields keep their prior value; the equality
/// filters take `Some(None)` to clear.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterPatch {
    pub search: Option<String>,
    pub severity: Option<Option<Severity>>,
    pub category: Option<Option<Category>>,
    pub status: Option<Option<Status>>,
    pub sort_by: Option<SortKey>,
    pub sort_direction: Option<SortDirection>,
}

impl FilterPatch {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn severity(severity: Option<Severity>) -> Self {
        Self {
            severity: Some(severity),
            ..Self::default()
        }
    }

    pub fn category(category: Option<Category>) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn status(status: Option<Status>) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn sort(sort_by: SortKey, direction: SortDirection) -> Self {
        Self {
            sort_by: Some(sort_by),
            sort_direction: Some(direction),
            ..Self::default()
        }
    }
}

impl FilterSpec {
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(severity) = patch.severity {
            self.severity = severity;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(sort_by) = patch.sort_by {
            self.sort_by = sort_by;
        }
        if let Some(direction) = patch.sort_direction {
            self.sort_direction = direction;
        }
    }

    /// True when any criterion narrows the list (sorting alone does not).
    pub fn is_narrowing(&self) -> bool {
        !self.search.is_empty()
            || self.severity.is_some()
            || self.category.is_some()
            || self.status.is_some()
    }

    pub fn matches(&self, incident: &Incident) -> bool {
        let search_ok = self.search.is_empty() || {
            let needle = self.search.to_lowercase();
            incident.title.to_lowercase().contains(&needle)
                || incident.description.to_lowercase().contains(&needle)
        };

        search_ok
            && self.severity.map_or(true, |s| s == incident.severity)
            && self.category.map_or(true, |c| c == incident.category)
            && self.status.map_or(true, |s| s == incident.status)
    }

    pub fn compare(&self, a: &Incident, b: &Incident) -> Ordering {
        let base = match self.sort_by {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Severity => a.severity.rank().cmp(&b.severity.rank()),
            SortKey::Title => locale_compare(&a.title, &b.title),
        };
        match self.sort_direction {
            SortDirection::Asc => base,
            SortDirection::Desc => base.reverse(),
        }
    }
}

/// Filter then stable-sort. Ties keep their collection order in both directions.
pub fn list_filtered(incidents: &[Incident], spec: &FilterSpec) -> Vec<Incident> {
    let mut out = incidents
        .iter()
        .filter(|inc| spec.matches(inc))
        .cloned()
        .collect::<Vec<_>>();
    out.sort_by(|a, b| spec.compare(a, b));
    out
}

/// Dictionary-style ordering, levels compared in turn:
/// 1. base letters, case and diacritics folded away (`éclair` < `zebra`);
/// 2. accents, unaccented first (`resume` < `résumé`);
/// 3. case, lowercase first;
/// 4. raw code points, so distinct strings never compare equal.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| lowercase_nfd(a).cmp(lowercase_nfd(b)))
        .then_with(|| case_tiebreak(a, b))
        .then_with(|| a.cmp(b))
}

fn lowercase_nfd(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase).nfd()
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    lowercase_nfd(s).filter(|c| !is_combining_mark(*c))
}

fn case_tiebreak(a: &str, b: &str) -> Ordering {
    a.chars()
        .zip(b.chars())
        .find_map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
            _ if x == y => None,
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            _ => None,
        })
        .unwrap_or(Ordering::Equal)
}

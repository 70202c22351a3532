use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::domain::{Incident, NewIncident};
use crate::error::AppError;
use crate::ids::IdGenerator;

const MAX_ID_ATTEMPTS: usize = 16;

/// Authoritative, ordered incident collection (most recent insert first).
///
/// Contract:
/// - ids are minted here and never repeat within the collection.
/// - `created` is written once on insert; `updated` never moves backwards.
/// - Every mutation either applies fully or returns an error before touching the collection.
/// - `update`/`delete` on an unknown id return `STORE_INCIDENT_NOT_FOUND`.
pub struct IncidentStore {
    incidents: Vec<Incident>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl IncidentStore {
    pub fn new(clock: impl Clock + 'static, ids: impl IdGenerator + 'static) -> Self {
        Self {
            incidents: Vec::new(),
            clock: Box::new(clock),
            ids: Box::new(ids),
        }
    }

    /// Initialize from a complete record set (sample data). Order is kept as given.
    pub fn with_seed(
        seed: Vec<Incident>,
        clock: impl Clock + 'static,
        ids: impl IdGenerator + 'static,
    ) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        for inc in &seed {
            if !seen.insert(inc.id.as_str()) {
                return Err(AppError::new(
                    "SEED_DUPLICATE_ID",
                    "Sample data contains a duplicate incident id",
                )
                .with_details(format!("id={}", inc.id)));
            }
            if inc.updated < inc.created {
                return Err(AppError::new(
                    "SEED_INVALID_TIMESTAMPS",
                    "Sample data has an incident updated before it was created",
                )
                .with_details(format!("id={}", inc.id)));
            }
        }

        info!(count = seed.len(), "seeded incident store");
        let mut store = Self::new(clock, ids);
        store.incidents = seed;
        Ok(store)
    }

    pub fn list_all(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn get(&self, id: &str) -> Option<&Incident> {
        self.incidents.iter().find(|inc| inc.id == id)
    }

    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.incidents.iter().position(|inc| inc.id == id)
    }

    fn fresh_id(&mut self) -> Result<String, AppError> {
        let mut last = String::new();
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            if !candidate.is_empty() && self.position(&candidate).is_none() {
                return Ok(candidate);
            }
            last = candidate;
        }
        Err(AppError::new(
            "STORE_ID_COLLISION",
            "Id generator did not produce an unused id",
        )
        .with_details(format!("attempts={MAX_ID_ATTEMPTS}; last={last}")))
    }

    /// Insert a new incident at the front of the collection.
    pub fn create(&mut self, fields: NewIncident) -> Result<Incident, AppError> {
        let id = self.fresh_id()?;
        let now = self.clock.now();
        let incident = fields.into_incident(id, now, now);

        debug!(id = %incident.id, "created incident");
        self.incidents.insert(0, incident.clone());
        Ok(incident)
    }

    /// Replace the stored record with the same id, keeping its position.
    ///
    /// Caller fields are taken verbatim except `created` (always the stored value) and
    /// `updated` (refreshed from the clock, clamped so it never decreases).
    pub fn update(&mut self, record: Incident) -> Result<Incident, AppError> {
        let Some(idx) = self.position(&record.id) else {
            warn!(id = %record.id, "update rejected: unknown incident");
            return Err(AppError::not_found(&record.id));
        };

        let existing = &self.incidents[idx];
        let now = self.clock.now();
        let updated = Incident {
            created: existing.created,
            updated: now.max(existing.updated),
            ..record
        };

        debug!(id = %updated.id, "updated incident");
        self.incidents[idx] = updated.clone();
        Ok(updated)
    }

    pub fn delete(&mut self, id: &str) -> Result<Incident, AppError> {
        let Some(idx) = self.position(id) else {
            warn!(id = %id, "delete rejected: unknown incident");
            return Err(AppError::not_found(id));
        };

        debug!(id = %id, "deleted incident");
        Ok(self.incidents.remove(idx))
    }
}

impl std::fmt::Debug for IncidentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncidentStore")
            .field("incidents", &self.incidents)
            .finish_non_exhaustive()
    }
}

use crate::analytics::{build_distribution, compute_stats, Distribution, IncidentStats};
use crate::clock::Clock;
use crate::config::DashboardConfig;
use crate::demo::seeded_store;
use crate::domain::Incident;
use crate::error::AppError;
use crate::filter::{list_filtered, FilterPatch, FilterSpec};
use crate::ids::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
use crate::store::IncidentStore;
use crate::validate::{validate_draft, IncidentDraft};

/// State a dashboard front end holds: the store, the active filters and the open detail view.
///
/// Derived views are recomputed on each call from the current collection and filters; there
/// is no cached projection to invalidate.
#[derive(Debug)]
pub struct DashboardSession {
    store: IncidentStore,
    filters: FilterSpec,
    initial_filters: FilterSpec,
    selected: Option<String>,
}

impl DashboardSession {
    pub fn new(store: IncidentStore, filters: FilterSpec) -> Self {
        Self {
            store,
            initial_filters: filters.clone(),
            filters,
            selected: None,
        }
    }

    /// Build the start-up session described by `config`.
    pub fn from_config(
        config: &DashboardConfig,
        clock: impl Clock + 'static,
    ) -> Result<Self, AppError> {
        let ids: Box<dyn IdGenerator> = match &config.id_prefix {
            Some(prefix) => Box::new(SequentialIdGenerator::new(prefix.clone())),
            None => Box::new(UuidIdGenerator),
        };
        let store = if config.seed_demo {
            seeded_store(clock, ids)?
        } else {
            IncidentStore::new(clock, ids)
        };
        Ok(Self::new(store, config.initial_filters()))
    }

    pub fn store(&self) -> &IncidentStore {
        &self.store
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn set_filter(&mut self, patch: FilterPatch) {
        self.filters.apply(patch);
    }

    pub fn toggle_sort_direction(&mut self) {
        self.filters.sort_direction = self.filters.sort_direction.toggled();
    }

    pub fn reset_filters(&mut self) {
        self.filters = self.initial_filters.clone();
    }

    /// Filtered and sorted list for the incident table.
    pub fn visible(&self) -> Vec<Incident> {
        list_filtered(self.store.list_all(), &self.filters)
    }

    pub fn stats(&self) -> IncidentStats {
        compute_stats(self.store.list_all())
    }

    pub fn distribution(&self) -> Distribution {
        build_distribution(self.store.list_all())
    }

    /// Validate the form, then create. Nothing is stored when validation fails.
    pub fn submit(&mut self, draft: &IncidentDraft) -> Result<Incident, AppError> {
        let fields = validate_draft(draft)?;
        self.store.create(fields)
    }

    pub fn update(&mut self, record: Incident) -> Result<Incident, AppError> {
        self.store.update(record)
    }

    pub fn delete(&mut self, id: &str) -> Result<Incident, AppError> {
        let removed = self.store.delete(id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Ok(removed)
    }

    pub fn select(&mut self, id: &str) -> Result<&Incident, AppError> {
        let incident = self.store.get(id).ok_or_else(|| AppError::not_found(id))?;
        self.selected = Some(incident.id.clone());
        Ok(incident)
    }

    pub fn selected(&self) -> Option<&Incident> {
        self.selected.as_deref().and_then(|id| self.store.get(id))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

use crate::clock::Clock;
use crate::domain::Incident;
use crate::error::AppError;
use crate::ids::IdGenerator;
use crate::store::IncidentStore;

fn demo_json() -> &'static str {
    // Sanitized, fixed dataset covering every severity and category so the dashboard widgets
    // render something meaningful on first start.
    include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../fixtures/demo/incidents.json"
    ))
}

/// Parse a sample set: a JSON array of complete incident records.
pub fn parse_incidents_json(text: &str) -> Result<Vec<Incident>, AppError> {
    serde_json::from_str(text).map_err(|e| {
        AppError::new("SEED_PARSE_FAILED", "Failed to parse sample incidents")
            .with_details(e.to_string())
    })
}

pub fn sample_incidents() -> Result<Vec<Incident>, AppError> {
    parse_incidents_json(demo_json())
}

pub fn seeded_store(
    clock: impl Clock + 'static,
    ids: impl IdGenerator + 'static,
) -> Result<IncidentStore, AppError> {
    IncidentStore::with_seed(sample_incidents()?, clock, ids)
}

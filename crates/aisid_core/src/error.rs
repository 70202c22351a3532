use serde::{Deserialize, Serialize};
use std::fmt;

/// Single structured error shape shared by the store, the session and the front end.
///
/// `code` is stable and machine-matchable (e.g. `STORE_INCIDENT_NOT_FOUND`); `message` is
/// human-readable; `details` carries the offending value or a JSON payload (field errors).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl AppError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn not_found(id: &str) -> Self {
        Self::new("STORE_INCIDENT_NOT_FOUND", "Incident not found").with_details(format!("id={id}"))
    }

    pub fn is_not_found(&self) -> bool {
        self.code == "STORE_INCIDENT_NOT_FOUND"
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

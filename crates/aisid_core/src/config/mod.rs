use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::filter::{FilterSpec, SortDirection, SortKey};

/// Start-up settings for a dashboard session. Every field has a default, so `{}` is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Load the bundled sample incidents at start-up.
    pub seed_demo: bool,
    pub default_sort_by: SortKey,
    pub default_sort_direction: SortDirection,
    /// When set, ids are `<prefix>-0001`, `<prefix>-0002`, ... instead of random UUIDs.
    pub id_prefix: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            seed_demo: true,
            default_sort_by: SortKey::Date,
            default_sort_direction: SortDirection::Desc,
            id_prefix: None,
        }
    }
}

fn validate_config_path(path: &Path) -> Result<(), AppError> {
    if path.as_os_str().is_empty() {
        return Err(AppError::new(
            "CONFIG_INVALID_PATH",
            "Config path is empty",
        ));
    }
    if path.is_dir() {
        return Err(AppError::new(
            "CONFIG_INVALID_PATH",
            "Config path must be a file (not a directory)",
        )
        .with_details(path.display().to_string()));
    }
    Ok(())
}

impl DashboardConfig {
    pub fn from_json(text: &str) -> Result<Self, AppError> {
        serde_json::from_str(text).map_err(|e| {
            AppError::new("CONFIG_PARSE_FAILED", "Failed to parse dashboard config")
                .with_details(e.to_string())
        })
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        validate_config_path(path)?;

        let text = fs::read_to_string(path).map_err(|e| {
            AppError::new("CONFIG_READ_FAILED", "Failed to read dashboard config")
                .with_details(format!("path={}; err={e}", path.display()))
        })?;
        let config = Self::from_json(&text)?;
        info!(path = %path.display(), "loaded dashboard config");
        Ok(config)
    }

    pub fn initial_filters(&self) -> FilterSpec {
        FilterSpec {
            sort_by: self.default_sort_by,
            sort_direction: self.default_sort_direction,
            ..FilterSpec::default()
        }
    }
}

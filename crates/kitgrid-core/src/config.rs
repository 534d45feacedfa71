//! Configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer; every field has a
//! default so an empty or missing file is valid.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub page_size: usize,
    pub log_level: String,
    pub eligibility: EligibilityConfig,
    pub api: ApiConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            log_level: "info".to_string(),
            eligibility: EligibilityConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(GridError::validation("page_size must be at least 1"));
        }
        if self.eligibility.primary_status.trim().is_empty() {
            return Err(GridError::validation(
                "eligibility.primary_status must not be empty",
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(GridError::validation("api.timeout_secs must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EligibilityConfig {
    pub primary_status: String,
    pub closed_secondary_statuses: Vec<String>,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            primary_status: "Pending".to_string(),
            closed_secondary_statuses: vec!["Approved".to_string(), "Rejected".to_string()],
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 30,
        }
    }
}

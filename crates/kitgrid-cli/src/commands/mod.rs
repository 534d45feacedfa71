pub mod decide;
pub mod list;
pub mod render;
pub mod show;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use kitgrid_application::ApprovalGridScreen;
use kitgrid_core::config::GridConfig;
use kitgrid_infrastructure::logging::init_tracing;
use kitgrid_infrastructure::{ConfigService, HttpApiClient, JsonDatasetRepository};

/// Resolved configuration plus the chosen backend.
pub struct Context {
    pub config: GridConfig,
    data: Option<PathBuf>,
}

impl Context {
    pub fn build(config_path: Option<PathBuf>, data: Option<PathBuf>) -> Result<Self> {
        let service = match config_path {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new()?,
        };
        let config = service
            .get_config()
            .with_context(|| format!("Failed to load configuration from {:?}", service.path()))?;
        init_tracing(&config.log_level);

        Ok(Self { config, data })
    }

    /// A screen backed by the JSON file if `--data` was given, else by HTTP.
    pub fn screen(&self) -> Result<ApprovalGridScreen> {
        let screen = match &self.data {
            Some(path) => {
                tracing::debug!("[Cli] Using JSON dataset {:?}", path);
                let repo = Arc::new(JsonDatasetRepository::new(path.clone()));
                ApprovalGridScreen::from_config(&self.config, repo.clone(), repo)?
            }
            None => {
                let client = Arc::new(
                    HttpApiClient::from_config(&self.config.api)
                        .context("Pass --data <file.json> or set api.base_url")?,
                );
                ApprovalGridScreen::from_config(&self.config, client.clone(), client)?
            }
        };
        Ok(screen)
    }
}

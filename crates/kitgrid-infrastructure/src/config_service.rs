//! Configuration service implementation.
//!
//! Loads `GridConfig` from `config.toml` (by default
//! `~/.config/kitgrid/config.toml`), applies environment overrides and
//! caches the result.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use kitgrid_core::config::GridConfig;
use kitgrid_core::error::{GridError, Result};

use crate::paths::KitgridPaths;

/// Overrides `page_size`.
pub const ENV_PAGE_SIZE: &str = "KITGRID_PAGE_SIZE";
/// Overrides `api.base_url`.
pub const ENV_API_URL: &str = "KITGRID_API_URL";

/// Configuration service that loads and caches the grid configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<GridConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config file location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(KitgridPaths::config_file()?))
    }

    /// Creates a service reading `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading it from file if not cached.
    ///
    /// A missing file yields the defaults.
    pub fn get_config(&self) -> Result<GridConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| GridError::internal("config cache lock poisoned"))?;
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let mut loaded = Self::load_file(&self.path)?;
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok())?;
        loaded.validate()?;

        let mut write_lock = self
            .config
            .write()
            .map_err(|_| GridError::internal("config cache lock poisoned"))?;
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    /// Writes `config` to the config file and refreshes the cache.
    pub fn save(&self, config: &GridConfig) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        let tmp_path = self.path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;
        tracing::info!("[ConfigService] Saved configuration to {:?}", self.path);

        self.invalidate_cache();
        Ok(())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn load_file(path: &Path) -> Result<GridConfig> {
        if !path.exists() {
            tracing::debug!(
                "[ConfigService] No config file at {:?}, using defaults",
                path
            );
            return Ok(GridConfig::default());
        }

        let content = fs::read_to_string(path)?;
        let config: GridConfig = toml::from_str(&content)?;
        tracing::debug!("[ConfigService] Loaded configuration from {:?}", path);
        Ok(config)
    }
}

/// Applies `KITGRID_*` overrides looked up through `lookup`.
pub fn apply_env_overrides<F>(config: &mut GridConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(ENV_PAGE_SIZE) {
        config.page_size = raw.trim().parse().map_err(|_| {
            GridError::config(format!("{} must be a positive integer, got '{}'", ENV_PAGE_SIZE, raw))
        })?;
    }
    if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
        config.api.base_url = Some(url);
    }
    Ok(())
}

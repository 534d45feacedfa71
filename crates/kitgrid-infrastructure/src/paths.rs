//! Path resolution for kitgrid configuration files.
//!
//! ```text
//! ~/.config/kitgrid/           # Config directory (platform equivalent elsewhere)
//! └── config.toml              # Application configuration
//! ```

use std::path::PathBuf;

use kitgrid_core::error::{GridError, Result};

pub const APP_DIR: &str = "kitgrid";
pub const CONFIG_FILE: &str = "config.toml";

pub struct KitgridPaths;

impl KitgridPaths {
    /// Returns the kitgrid configuration directory.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| GridError::config("Cannot find the user configuration directory"))
    }

    /// Returns the path of `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }
}

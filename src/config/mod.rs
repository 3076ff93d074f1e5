//! Configuration module for agentloki
//!
//! [`APP_CONFIG_DEFAULTS`] is the compile-time default. Deployments derive
//! their effective configuration by layering overlays on top of it:
//! defaults, then `$XDG_CONFIG_HOME/agentloki/config.toml` (or the file named
//! by `AGENTLOKI_CONFIG`), then `AGENTLOKI_*` environment variables.
//! Overlays replace whole fields; nothing is deep-merged.
//!
//! # Example
//!
//! ```no_run
//! use agentloki_config::config;
//!
//! let config = config::load().expect("Failed to load config");
//! println!("Company: {}", config.company_name);
//! println!("Chat input: {}", config.supports_chat_input);
//! ```

pub mod overlay;
pub mod sandbox;
pub mod schema;

pub use overlay::AppConfigOverlay;
pub use sandbox::SandboxConfig;
pub use schema::{AppConfig, APP_CONFIG_DEFAULTS};

use crate::error::{AppConfigError, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_VAR: &str = "AGENTLOKI_CONFIG";

/// Get config file path
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_VAR).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = dirs::config_dir().ok_or_else(|| {
        AppConfigError::Config("Could not determine user config directory".to_string())
    })?;

    Ok(config_dir.join("agentloki/config.toml"))
}

/// Load the effective configuration from the default file and environment
pub fn load() -> Result<AppConfig> {
    let path = config_path()?;
    load_from(Some(&path), true)
}

/// Load the effective configuration from an optional file and, if asked, the environment
pub fn load_from(path: Option<&Path>, use_env: bool) -> Result<AppConfig> {
    let mut overlay = AppConfigOverlay::default();

    if let Some(path) = path {
        overlay = overlay.layer(AppConfigOverlay::from_file(path)?);
    }

    if use_env {
        let env = AppConfigOverlay::from_env()?;
        if !env.is_empty() {
            tracing::debug!("Applying environment overrides");
        }
        overlay = overlay.layer(env);
    }

    Ok(APP_CONFIG_DEFAULTS.merged(&overlay))
}

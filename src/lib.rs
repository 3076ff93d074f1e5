pub mod config;
pub mod error;

pub use config::{AppConfig, AppConfigOverlay, SandboxConfig, APP_CONFIG_DEFAULTS};
pub use error::{AppConfigError, Result};

use thiserror::Error;

/// Main error type for agentloki-config
///
/// Only the overlay and loading layers can fail at runtime. A malformed
/// `AppConfig` literal is rejected by the compiler.
#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("Config error: {0}\n\nTroubleshooting:\n- Check config file: ~/.config/agentloki/config.toml\n- Override the location with AGENTLOKI_CONFIG\n- Run with RUST_LOG=debug for more details")]
    Config(String),

    #[error("Invalid value {value:?} for environment variable {var}\n\nTroubleshooting:\n- Values must be valid UTF-8\n- Boolean toggles accept true/false, 1/0, yes/no, on/off\n- Unset the variable to keep the default")]
    Env { var: String, value: String },

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse sandbox config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppConfigError>;

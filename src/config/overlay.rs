use crate::config::schema::{non_empty_text, AppConfig, Text};
use crate::error::{AppConfigError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Prefix for per-field environment overrides, e.g. `AGENTLOKI_COMPANY_NAME`
pub const ENV_PREFIX: &str = "AGENTLOKI_";

/// Sandbox pass-through variables, consulted after their prefixed forms
pub const SANDBOX_ID_VAR: &str = "SANDBOX_ID";
pub const AGENT_NAME_VAR: &str = "AGENT_NAME";

/// Partial configuration: every field of [`AppConfig`] made optional
///
/// A present field replaces the base value when merged. An absent field
/// leaves the base untouched, so an overlay can never clear an optional
/// field back to "no value".
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AppConfigOverlay {
    #[serde(
        default,
        deserialize_with = "non_empty_text",
        alias = "page_title",
        skip_serializing_if = "Option::is_none"
    )]
    pub page_title: Option<Text>,
    #[serde(
        default,
        deserialize_with = "non_empty_text",
        alias = "page_description",
        skip_serializing_if = "Option::is_none"
    )]
    pub page_description: Option<Text>,
    #[serde(
        default,
        deserialize_with = "non_empty_text",
        alias = "company_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub company_name: Option<Text>,

    #[serde(default, alias = "supports_chat_input", skip_serializing_if = "Option::is_none")]
    pub supports_chat_input: Option<bool>,
    #[serde(default, alias = "supports_video_input", skip_serializing_if = "Option::is_none")]
    pub supports_video_input: Option<bool>,
    #[serde(default, alias = "supports_screen_share", skip_serializing_if = "Option::is_none")]
    pub supports_screen_share: Option<bool>,
    #[serde(
        default,
        alias = "is_pre_connect_buffer_enabled",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_pre_connect_buffer_enabled: Option<bool>,

    #[serde(default, deserialize_with = "non_empty_text", skip_serializing_if = "Option::is_none")]
    pub logo: Option<Text>,
    #[serde(
        default,
        deserialize_with = "non_empty_text",
        alias = "start_button_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_button_text: Option<Text>,
    #[serde(default, deserialize_with = "non_empty_text", skip_serializing_if = "Option::is_none")]
    pub accent: Option<Text>,
    #[serde(
        default,
        deserialize_with = "non_empty_text",
        alias = "logo_dark",
        skip_serializing_if = "Option::is_none"
    )]
    pub logo_dark: Option<Text>,
    #[serde(
        default,
        deserialize_with = "non_empty_text",
        alias = "accent_dark",
        skip_serializing_if = "Option::is_none"
    )]
    pub accent_dark: Option<Text>,

    #[serde(
        default,
        deserialize_with = "non_empty_text",
        alias = "sandbox_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub sandbox_id: Option<Text>,
    #[serde(
        default,
        deserialize_with = "non_empty_text",
        alias = "agent_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub agent_name: Option<Text>,
}

impl AppConfigOverlay {
    /// True when no field is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Combine with a higher-precedence overlay; `higher` wins per field
    #[must_use]
    pub fn layer(self, higher: Self) -> Self {
        Self {
            page_title: higher.page_title.or(self.page_title),
            page_description: higher.page_description.or(self.page_description),
            company_name: higher.company_name.or(self.company_name),
            supports_chat_input: higher.supports_chat_input.or(self.supports_chat_input),
            supports_video_input: higher.supports_video_input.or(self.supports_video_input),
            supports_screen_share: higher.supports_screen_share.or(self.supports_screen_share),
            is_pre_connect_buffer_enabled: higher
                .is_pre_connect_buffer_enabled
                .or(self.is_pre_connect_buffer_enabled),
            logo: higher.logo.or(self.logo),
            start_button_text: higher.start_button_text.or(self.start_button_text),
            accent: higher.accent.or(self.accent),
            logo_dark: higher.logo_dark.or(self.logo_dark),
            accent_dark: higher.accent_dark.or(self.accent_dark),
            sandbox_id: higher.sandbox_id.or(self.sandbox_id),
            agent_name: higher.agent_name.or(self.agent_name),
        }
    }

    /// Parse an overlay from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load an overlay from a TOML file, empty if the file doesn't exist
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            AppConfigError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let overlay = Self::from_toml_str(&content).map_err(|e| {
            AppConfigError::Config(format!("Failed to load {}: {e}", path.display()))
        })?;

        tracing::debug!("Loaded config overlay from {}", path.display());
        Ok(overlay)
    }

    /// Read overrides from the process environment
    ///
    /// Variables that aren't ours are ignored even when not valid unicode.
    pub fn from_env() -> Result<Self> {
        let mut vars = Vec::new();

        for (name, value) in std::env::vars_os() {
            let Ok(name) = name.into_string() else {
                continue;
            };
            if !is_override_var(&name) {
                continue;
            }

            let value = value.into_string().map_err(|raw| AppConfigError::Env {
                var: name.clone(),
                value: raw.to_string_lossy().into_owned(),
            })?;
            vars.push((name, value));
        }

        Self::from_vars(vars)
    }

    /// Read overrides from `(name, value)` pairs
    ///
    /// Empty values count as unset.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.is_empty())
            .collect();

        let raw = |name: &str| vars.get(name).cloned();
        let text = |field: &str| raw(&format!("{ENV_PREFIX}{field}")).map(Cow::Owned);
        let flag = |field: &str| -> Result<Option<bool>> {
            let var = format!("{ENV_PREFIX}{field}");
            vars.get(&var)
                .map(|value| {
                    parse_bool(value).ok_or_else(|| AppConfigError::Env {
                        var: var.clone(),
                        value: value.clone(),
                    })
                })
                .transpose()
        };

        Ok(Self {
            page_title: text("PAGE_TITLE"),
            page_description: text("PAGE_DESCRIPTION"),
            company_name: text("COMPANY_NAME"),
            supports_chat_input: flag("SUPPORTS_CHAT_INPUT")?,
            supports_video_input: flag("SUPPORTS_VIDEO_INPUT")?,
            supports_screen_share: flag("SUPPORTS_SCREEN_SHARE")?,
            is_pre_connect_buffer_enabled: flag("IS_PRE_CONNECT_BUFFER_ENABLED")?,
            logo: text("LOGO"),
            start_button_text: text("START_BUTTON_TEXT"),
            accent: text("ACCENT"),
            logo_dark: text("LOGO_DARK"),
            accent_dark: text("ACCENT_DARK"),
            sandbox_id: text("SANDBOX_ID").or_else(|| raw(SANDBOX_ID_VAR).map(Cow::Owned)),
            agent_name: text("AGENT_NAME").or_else(|| raw(AGENT_NAME_VAR).map(Cow::Owned)),
        })
    }
}

impl AppConfig {
    /// Derive a new configuration with the overlay's present fields applied
    #[must_use]
    pub fn merged(&self, overlay: &AppConfigOverlay) -> Self {
        let text = |over: &Option<Text>, base: &Text| over.clone().unwrap_or_else(|| base.clone());
        let optional =
            |over: &Option<Text>, base: &Option<Text>| over.clone().or_else(|| base.clone());

        Self {
            page_title: text(&overlay.page_title, &self.page_title),
            page_description: text(&overlay.page_description, &self.page_description),
            company_name: text(&overlay.company_name, &self.company_name),
            supports_chat_input: overlay.supports_chat_input.unwrap_or(self.supports_chat_input),
            supports_video_input: overlay
                .supports_video_input
                .unwrap_or(self.supports_video_input),
            supports_screen_share: overlay
                .supports_screen_share
                .unwrap_or(self.supports_screen_share),
            is_pre_connect_buffer_enabled: overlay
                .is_pre_connect_buffer_enabled
                .unwrap_or(self.is_pre_connect_buffer_enabled),
            logo: text(&overlay.logo, &self.logo),
            start_button_text: text(&overlay.start_button_text, &self.start_button_text),
            accent: optional(&overlay.accent, &self.accent),
            logo_dark: optional(&overlay.logo_dark, &self.logo_dark),
            accent_dark: optional(&overlay.accent_dark, &self.accent_dark),
            sandbox_id: optional(&overlay.sandbox_id, &self.sandbox_id),
            agent_name: optional(&overlay.agent_name, &self.agent_name),
        }
    }
}

fn is_override_var(name: &str) -> bool {
    name.starts_with(ENV_PREFIX) || name == SANDBOX_ID_VAR || name == AGENT_NAME_VAR
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

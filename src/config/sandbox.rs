//! Typed settings served by a hosted LiveKit Cloud sandbox
//!
//! The sandbox reports its settings as a JSON object of typed entries:
//!
//! ```json
//! {
//!   "companyName": { "type": "string", "value": "Acme" },
//!   "supportsVideoInput": { "type": "boolean", "value": false },
//!   "logoDark": null
//! }
//! ```
//!
//! Fetching that document is left to the caller.

use crate::config::overlay::AppConfigOverlay;
use crate::config::schema::{AppConfig, Text};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Declared type of a sandbox entry
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    String,
    Boolean,
    #[serde(other)]
    Unknown,
}

/// One typed sandbox setting
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct SandboxEntry {
    #[serde(rename = "type")]
    pub kind: EntryType,
    pub value: Value,
}

/// Sandbox settings keyed by camelCase field name
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct SandboxConfig {
    pub entries: BTreeMap<String, Option<SandboxEntry>>,
}

impl SandboxConfig {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Convert to an overlay, keeping only well-typed entries for known fields
    #[must_use]
    pub fn to_overlay(&self) -> AppConfigOverlay {
        let mut overlay = AppConfigOverlay::default();

        for (key, entry) in &self.entries {
            let Some(entry) = entry else {
                continue;
            };

            let applied = match entry.kind {
                EntryType::String => match (entry.value.as_str(), text_slot(&mut overlay, key)) {
                    (Some(value), Some(slot)) if !value.is_empty() => {
                        *slot = Some(Cow::Owned(value.to_string()));
                        true
                    }
                    _ => false,
                },
                EntryType::Boolean => match (entry.value.as_bool(), flag_slot(&mut overlay, key)) {
                    (Some(value), Some(slot)) => {
                        *slot = Some(value);
                        true
                    }
                    _ => false,
                },
                EntryType::Unknown => false,
            };

            if !applied {
                tracing::debug!("Skipping sandbox entry {key:?}: unknown field or type mismatch");
            }
        }

        overlay
    }
}

impl AppConfig {
    /// Derive the configuration for a sandbox session
    ///
    /// A non-empty `sandbox_id` wins over any id carried in the entries.
    #[must_use]
    pub fn for_sandbox(&self, sandbox_id: impl Into<String>, sandbox: &SandboxConfig) -> Self {
        let mut overlay = sandbox.to_overlay();
        let sandbox_id = sandbox_id.into();
        if !sandbox_id.is_empty() {
            overlay.sandbox_id = Some(Cow::Owned(sandbox_id));
        }
        self.merged(&overlay)
    }
}

fn text_slot<'a>(overlay: &'a mut AppConfigOverlay, key: &str) -> Option<&'a mut Option<Text>> {
    let slot = match key {
        "pageTitle" => &mut overlay.page_title,
        "pageDescription" => &mut overlay.page_description,
        "companyName" => &mut overlay.company_name,
        "logo" => &mut overlay.logo,
        "startButtonText" => &mut overlay.start_button_text,
        "accent" => &mut overlay.accent,
        "logoDark" => &mut overlay.logo_dark,
        "accentDark" => &mut overlay.accent_dark,
        "sandboxId" => &mut overlay.sandbox_id,
        "agentName" => &mut overlay.agent_name,
        _ => return None,
    };
    Some(slot)
}

fn flag_slot<'a>(overlay: &'a mut AppConfigOverlay, key: &str) -> Option<&'a mut Option<bool>> {
    let slot = match key {
        "supportsChatInput" => &mut overlay.supports_chat_input,
        "supportsVideoInput" => &mut overlay.supports_video_input,
        "supportsScreenShare" => &mut overlay.supports_screen_share,
        "isPreConnectBufferEnabled" => &mut overlay.is_pre_connect_buffer_enabled,
        _ => return None,
    };
    Some(slot)
}

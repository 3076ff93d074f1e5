use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;

/// Text that is either a compile-time literal or an owned override
pub type Text = Cow<'static, str>;

/// Presentation and feature settings for one running front-end instance
///
/// Required fields are plain values, so a literal that leaves one out does
/// not compile:
///
/// ```compile_fail
/// use agentloki_config::AppConfig;
/// use std::borrow::Cow;
///
/// let config = AppConfig {
///     page_title: Cow::Borrowed("Title"),
///     page_description: Cow::Borrowed("Description"),
///     supports_chat_input: true,
///     supports_video_input: true,
///     supports_screen_share: true,
///     is_pre_connect_buffer_enabled: true,
///     logo: Cow::Borrowed("/logo.svg"),
///     start_button_text: Cow::Borrowed("Start"),
///     accent: None,
///     logo_dark: None,
///     accent_dark: None,
///     sandbox_id: None,
///     agent_name: None,
/// };
/// ```
///
/// The process-wide default is an immutable static:
///
/// ```compile_fail
/// use agentloki_config::APP_CONFIG_DEFAULTS;
///
/// APP_CONFIG_DEFAULTS.supports_chat_input = false;
/// ```
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AppConfig {
    pub page_title: Text,
    pub page_description: Text,
    pub company_name: Text,

    pub supports_chat_input: bool,
    pub supports_video_input: bool,
    pub supports_screen_share: bool,
    pub is_pre_connect_buffer_enabled: bool,

    pub logo: Text,
    pub start_button_text: Text,
    #[serde(
        default,
        deserialize_with = "non_empty_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub accent: Option<Text>,
    #[serde(
        default,
        deserialize_with = "non_empty_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub logo_dark: Option<Text>,
    #[serde(
        default,
        deserialize_with = "non_empty_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub accent_dark: Option<Text>,

    // LiveKit Cloud Sandbox
    #[serde(
        default,
        deserialize_with = "non_empty_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub sandbox_id: Option<Text>,
    #[serde(
        default,
        deserialize_with = "non_empty_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub agent_name: Option<Text>,
}

/// Canonical default configuration, built at compile time
pub static APP_CONFIG_DEFAULTS: AppConfig = AppConfig {
    company_name: Cow::Borrowed("GameGhor"),
    page_title: Cow::Borrowed("AgentLoki Masum's Personal Assistant"),
    page_description: Cow::Borrowed("Personal assistant of Nur Hasan Masum"),

    supports_chat_input: true,
    supports_video_input: true,
    supports_screen_share: true,
    is_pre_connect_buffer_enabled: true,

    logo: Cow::Borrowed("/icon.gif"),
    accent: Some(Cow::Borrowed("#002cf2")),
    logo_dark: Some(Cow::Borrowed("/icon.gif")),
    accent_dark: Some(Cow::Borrowed("#1fd5f9")),
    start_button_text: Cow::Borrowed("Lets Talk"),

    sandbox_id: None,
    agent_name: None,
};

impl AppConfig {
    /// Shared reference to the process-wide default
    #[must_use]
    pub fn defaults() -> &'static Self {
        &APP_CONFIG_DEFAULTS
    }

    /// Whether this configuration targets a hosted sandbox session
    #[must_use]
    pub const fn uses_sandbox(&self) -> bool {
        self.sandbox_id.is_some()
    }
}

/// Deserialize optional text, reading `""` as absent
pub(crate) fn non_empty_text<'de, D>(deserializer: D) -> Result<Option<Text>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()).map(Cow::Owned))
}

impl Default for AppConfig {
    fn default() -> Self {
        APP_CONFIG_DEFAULTS.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_required_text_fields_non_empty() {
        let config = AppConfig::defaults();
        for text in [
            &config.page_title,
            &config.page_description,
            &config.company_name,
            &config.logo,
            &config.start_button_text,
        ] {
            assert!(!text.is_empty());
        }
    }

    #[test]
    fn test_default_toggles_enabled() {
        let config = AppConfig::defaults();
        assert!(config.supports_chat_input);
        assert!(config.supports_video_input);
        assert!(config.supports_screen_share);
        assert!(config.is_pre_connect_buffer_enabled);
    }

    #[test]
    fn test_sandbox_fields_absent() {
        let config = AppConfig::defaults();
        assert_eq!(config.sandbox_id, None);
        assert_eq!(config.agent_name, None);
        assert!(!config.uses_sandbox());
    }

    #[test]
    fn test_default_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.company_name, "GameGhor");
        assert_eq!(config.page_title, "AgentLoki Masum's Personal Assistant");
        assert_eq!(config.start_button_text, "Lets Talk");
        assert_eq!(config.accent.as_deref(), Some("#002cf2"));
        assert_eq!(config.accent_dark.as_deref(), Some("#1fd5f9"));
        assert_eq!(config.logo_dark.as_deref(), Some("/icon.gif"));
    }

    #[test]
    fn test_reads_share_one_instance() {
        let first = AppConfig::defaults();
        let second = AppConfig::defaults();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.accent, second.accent);
    }

    #[test]
    fn test_clone_mutation_does_not_leak() {
        let mut copy = AppConfig::default();
        copy.company_name = Cow::Owned("Acme".to_string());
        copy.supports_chat_input = false;

        assert_eq!(APP_CONFIG_DEFAULTS.company_name, "GameGhor");
        assert!(APP_CONFIG_DEFAULTS.supports_chat_input);
        assert_eq!(AppConfig::default(), APP_CONFIG_DEFAULTS);
    }

    #[test]
    fn test_shareable_across_threads() {
        assert_send_sync::<AppConfig>();

        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| AppConfig::defaults().company_name.len()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "GameGhor".len());
        }
    }

    #[test]
    fn test_serialize_camel_case_skips_absent() {
        let json = serde_json::to_value(AppConfig::defaults()).unwrap();
        assert_eq!(json["companyName"], "GameGhor");
        assert_eq!(json["isPreConnectBufferEnabled"], true);
        assert!(json.get("sandboxId").is_none());
        assert!(json.get("agentName").is_none());
    }

    #[test]
    fn test_deserialize_empty_optional_is_absent() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "pageTitle": "t",
                "pageDescription": "d",
                "companyName": "c",
                "supportsChatInput": true,
                "supportsVideoInput": false,
                "supportsScreenShare": true,
                "isPreConnectBufferEnabled": true,
                "logo": "/logo.svg",
                "startButtonText": "Go",
                "accent": "",
                "sandboxId": "",
                "agentName": null
            }"#,
        )
        .unwrap();

        assert_eq!(config.accent, None);
        assert_eq!(config.sandbox_id, None);
        assert_eq!(config.agent_name, None);
        assert!(!config.uses_sandbox());
    }

    #[test]
    fn test_deserialize_missing_required_field_fails() {
        let result: std::result::Result<AppConfig, _> = toml::from_str(
            r#"
            pageTitle = "t"
            pageDescription = "d"
            supportsChatInput = true
            supportsVideoInput = true
            supportsScreenShare = true
            isPreConnectBufferEnabled = true
            logo = "/logo.svg"
            startButtonText = "Go"
            "#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("companyName"), "unexpected error: {err}");
    }
}

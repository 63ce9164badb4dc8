//! The configuration structs loaded from the environment, and their impls.
use std::time::Duration;

use lazy_regex::{regex_captures, regex_is_match};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::{ConfigError, ConfigResult};

pub const DEFAULT_TIMEOUT_MILLIS: u64 = 10_000;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "*";
pub const DEFAULT_LOG: &str = "info";

// ###################################
// ->   STRUCTS
// ###################################
/// Raw settings as they come out of the environment (and an optional TOML file).
/// Nothing here is validated yet, a missing API key is only an error once we try
/// to build a `MailingListConfig` from it.
#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub api_key: Option<SecretString>,
    pub audience_id: Option<String>,
    pub server_prefix: Option<String>,
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_millis")]
    pub timeout_millis: u64,
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
    #[serde(default = "default_log")]
    pub log: String,
}

/// Validated, immutable configuration of the mailing list provider.
#[derive(Clone, Debug)]
pub struct MailingListConfig {
    pub api_key: SecretString,
    pub audience_id: String,
    pub base_url: String,
    pub timeout: Duration,
}

// ###################################
// ->   IMPLs
// ###################################
impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_key: None,
            audience_id: None,
            server_prefix: None,
            base_url: None,
            timeout_millis: default_timeout_millis(),
            allowed_origin: default_allowed_origin(),
            log: default_log(),
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }

    pub fn mailing_list(&self) -> ConfigResult<MailingListConfig> {
        MailingListConfig::try_from(self)
    }
}

impl TryFrom<&Settings> for MailingListConfig {
    type Error = ConfigError;

    fn try_from(settings: &Settings) -> Result<Self, Self::Error> {
        let api_key = settings
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .cloned()
            .ok_or(ConfigError::MissingApiKey)?;

        let audience_id = settings
            .audience_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(ConfigError::MissingAudienceId)?
            .to_string();

        let base_url = match settings.base_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => {
                let prefix = match settings.server_prefix.as_deref() {
                    Some(prefix) if !prefix.trim().is_empty() => parse_server_prefix(prefix)?,
                    _ => server_prefix_from_api_key(&api_key)?,
                };
                format!("https://{prefix}.api.mailchimp.com")
            }
        };

        Ok(MailingListConfig {
            api_key,
            audience_id,
            base_url,
            timeout: settings.timeout(),
        })
    }
}

// ###################################
// ->   HELPERS
// ###################################
fn parse_server_prefix(value: &str) -> ConfigResult<String> {
    let value = value.trim().to_ascii_lowercase();
    if regex_is_match!(r#"^[a-z]+\d+$"#, &value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidServerPrefix(value))
    }
}

/// API keys look like `{key}-{server_prefix}`, e.g. `0123abcd-us21`.
fn server_prefix_from_api_key(api_key: &SecretString) -> ConfigResult<String> {
    let (_whole, prefix) =
        regex_captures!(r#"^[0-9A-Za-z]+-([a-z]+\d+)$"#, api_key.expose_secret())
            .ok_or(ConfigError::ServerPrefixNotInApiKey)?;
    Ok(prefix.to_string())
}

fn default_timeout_millis() -> u64 {
    DEFAULT_TIMEOUT_MILLIS
}

fn default_allowed_origin() -> String {
    DEFAULT_ALLOWED_ORIGIN.to_string()
}

fn default_log() -> String {
    DEFAULT_LOG.to_string()
}

// ###################################
// ->   TESTS
// ###################################

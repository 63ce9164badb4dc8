//! Tries to create `Settings` from the execution environment.
//! Settings are layered: an optional TOML file, then the legacy `API_KEY` and `AUD_ID`
//! variables, then everything prefixed with `LISTOMAT_`.
//! Loading is done once at cold start, the result gets handed to `AppState`.

mod error;
mod structs;

use std::path::Path;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};

// Re-export config structs
pub use error::{ConfigError, ConfigResult};
pub use structs::{
    MailingListConfig, Settings, DEFAULT_ALLOWED_ORIGIN, DEFAULT_LOG, DEFAULT_TIMEOUT_MILLIS,
};

pub const ENV_PREFIX: &str = "LISTOMAT_";
pub const CONFIG_FILE_ENV: &str = "LISTOMAT_CONFIG_FILE";

/// Builds the `Figment` the settings get extracted from.
pub fn figment<P: AsRef<Path>>(config_file: Option<P>) -> Figment {
    let mut figment = Figment::new();

    if let Some(file) = config_file {
        figment = figment.merge(Toml::file(file));
    }

    figment
        .merge(Env::raw().only(&["API_KEY"]))
        .merge(Env::raw().only(&["AUD_ID"]).map(|_| "audience_id".into()))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG_FILE"]))
}

/// Loads the `Settings`, reading the config file path from `LISTOMAT_CONFIG_FILE` if set.
pub fn load_settings() -> ConfigResult<Settings> {
    let config_file = std::env::var(CONFIG_FILE_ENV).ok();
    load_settings_from(config_file.as_deref())
}

pub fn load_settings_from<P: AsRef<Path>>(config_file: Option<P>) -> ConfigResult<Settings> {
    let settings = figment(config_file).extract()?;
    Ok(settings)
}

// ###################################
// ->   TESTS
// ###################################

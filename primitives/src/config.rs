use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub use toml::de::Error as TomlError;

pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(|| {
    Config::try_toml(include_str!("../../docs/config/global.toml"))
        .expect("Failed to parse global.toml config file")
});

pub static REGIONAL_CONFIG: Lazy<Config> = Lazy::new(|| {
    Config::try_toml(include_str!("../../docs/config/regional.toml"))
        .expect("Failed to parse regional.toml config file")
});

/// Which flavour of the WAF Classic API the requests are prepared for.
/// Defaults to [`Scope::Global`]
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// CloudFront distributions, `waf.amazonaws.com`
    #[default]
    Global,
    /// Application Load Balancers & API Gateway stages, `waf-regional.<region>.amazonaws.com`
    Regional,
}

/// What the client-side validator does with identical entries repeated in one update batch.
///
/// The service decides what a duplicate `INSERT` or a `DELETE` of a missing
/// entry means for each resource, so the default is to let them through.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    #[default]
    Allow,
    Reject,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub scope: Scope,
    /// Prefix of the `X-Amz-Target` header, e.g. `AWSWAF_20150824`
    pub target_prefix: String,
    pub endpoint: Url,
    /// Run the client-side validator before a request is prepared
    #[serde(default)]
    pub validate_requests: bool,
    #[serde(default)]
    pub duplicate_updates: DuplicatePolicy,
    /// How far back a sampled requests `TimeWindow` may start.
    /// In seconds
    pub sampling_window_secs: u32,
}

impl Config {
    /// Utility method that will deserialize a Toml file content into a [`Config`].
    ///
    /// Instead of relying on the `toml` crate directly, use this method instead.
    pub fn try_toml(toml: &str) -> Result<Self, TomlError> {
        toml::from_str(toml)
    }

    /// The `X-Amz-Target` header value for the given action name
    pub fn target(&self, action: &str) -> String {
        format!("{}.{}", self.target_prefix, action)
    }

    pub fn sampling_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.sampling_window_secs))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Toml parsing: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("File reading: {0}")]
    InvalidFile(#[from] std::io::Error),
}

/// If no `config_file` path is provided it will load the built-in [`Scope`] configuration.
/// If `config_file` path is provided it will try to read and parse the file in Toml format.
pub fn configuration(scope: Scope, config_file: Option<&str>) -> Result<Config, ConfigError> {
    match config_file {
        Some(config_file) => {
            let content = std::fs::read(config_file)?;

            Ok(toml::from_slice(&content)?)
        }
        None => match scope {
            Scope::Global => Ok(GLOBAL_CONFIG.clone()),
            Scope::Regional => Ok(REGIONAL_CONFIG.clone()),
        },
    }
}

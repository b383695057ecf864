//! [`Config`]-related definitions.

use std::{path::PathBuf, time};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// LifeOps API configuration.
    #[serde(default)]
    pub api: Api,

    /// Session storage configuration.
    #[serde(default)]
    pub store: Store,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// LifeOps API configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// Base address of the API.
    ///
    /// A relative one is resolved against the [`Api::origin`].
    #[default("/api".to_owned())]
    pub url: String,

    /// Origin relative [`Api::url`]s are resolved against.
    #[default("http://localhost:8080".to_owned())]
    pub origin: String,

    /// Timeout of a single request.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<time::Duration>,
}

impl Api {
    /// Returns the absolute base address of the API.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.url.starts_with("http://") || self.url.starts_with("https://")
        {
            return self.url.trim_end_matches('/').to_owned();
        }
        format!(
            "{}/{}",
            self.origin.trim_end_matches('/'),
            self.url.trim_matches('/'),
        )
        .trim_end_matches('/')
        .to_owned()
    }
}

impl From<&Api> for service::infra::api::Config {
    fn from(value: &Api) -> Self {
        Self {
            base_url: value.base_url(),
            timeout: value.timeout,
        }
    }
}

impl From<&Api> for service::Config {
    fn from(value: &Api) -> Self {
        Self {
            api_url: value.base_url(),
        }
    }
}

/// Session storage configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Store {
    /// Path to the JSON file holding the remembered session.
    #[default(PathBuf::from(".lifeops/storage.json"))]
    pub path: PathBuf,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    Info,

    /// Designates hazardous situations.
    #[default]
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Api, Config};

    #[test]
    fn resolves_relative_url_against_origin() {
        assert_eq!(Api::default().base_url(), "http://localhost:8080/api");

        let api = Api {
            url: "v2/".to_owned(),
            origin: "https://lifeops.app/".to_owned(),
            timeout: None,
        };
        assert_eq!(api.base_url(), "https://lifeops.app/v2");
    }

    #[test]
    fn keeps_absolute_url() {
        let api = Api {
            url: "https://api.lifeops.app/".to_owned(),
            ..Api::default()
        };

        assert_eq!(api.base_url(), "https://api.lifeops.app");
    }

    #[test]
    fn defaults_without_file() {
        let conf = Config::new("surely-missing-lifeops-config").unwrap();

        assert_eq!(conf.api.url, "/api");
        assert_eq!(conf.api.timeout, None);
        assert_eq!(
            conf.store.path.to_str(),
            Some(".lifeops/storage.json"),
        );
    }
}

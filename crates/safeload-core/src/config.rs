use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Base URL used when neither the config file nor the environment sets one.
pub const DEFAULT_CLASSIFIER_URL: &str = "http://localhost:8000/v1";

fn default_classifier_url() -> String {
    DEFAULT_CLASSIFIER_URL.to_owned()
}

fn default_timeout() -> u64 {
    20
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// Where reports are sent and how long each request may take.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_classifier_url")]
    pub url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            url: default_classifier_url(),
            timeout: default_timeout(),
        }
    }
}

impl ClassifierConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Defaults with env var overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SAFELOAD_CLASSIFIER_URL") {
            self.url = v;
        }
        if let Ok(v) = std::env::var("SAFELOAD_CLASSIFIER_TIMEOUT") {
            if let Ok(secs) = v.parse::<u64>() {
                self.timeout = secs;
            } else {
                tracing::warn!("ignoring invalid SAFELOAD_CLASSIFIER_TIMEOUT value: {v}");
            }
        }
    }
}

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.classifier.apply_env_overrides();
        Ok(config)
    }
}

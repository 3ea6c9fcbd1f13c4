//! Layered wizard configuration.

use crate::catalog::DEFAULT_FETCH_TIMEOUT;
use crate::error::ConfigError;
use crate::projector::SortOrder;
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix for environment overrides, e.g. `PEDALFINDER_FETCH_TIMEOUT_SECS`.
pub const ENV_PREFIX: &str = "PEDALFINDER_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Upper bound on a catalog fetch before the fallback is served.
    pub fetch_timeout_secs: u64,
    /// Replaces the bundled fallback dataset when set.
    pub fallback_path: Option<PathBuf>,
    pub log_level: String,
    pub default_sort: SortOrder,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT.as_secs(),
            fallback_path: None,
            log_level: "info".to_string(),
            default_sort: SortOrder::Relevance,
        }
    }
}

impl WizardConfig {
    /// Loads configuration from multiple sources.
    ///
    /// Priority (highest to lowest):
    /// 1. `PEDALFINDER_` environment variables
    /// 2. The JSON file at `path`, if given and present
    /// 3. Default values
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(path).extract().map_err(|e| ConfigError::from(Box::new(e)))
    }

    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Json::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_apply_without_sources() {
        Jail::expect_with(|_jail| {
            let config = WizardConfig::load(None).unwrap();
            assert_eq!(config, WizardConfig::default());
            assert_eq!(config.fetch_timeout(), Duration::from_secs(120));
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "wizard.json",
                r#"{ "fetch_timeout_secs": 30, "default_sort": "ip" }"#,
            )?;
            jail.set_env("PEDALFINDER_FETCH_TIMEOUT_SECS", "5");

            let config = WizardConfig::load(Some(Path::new("wizard.json"))).unwrap();
            assert_eq!(config.fetch_timeout_secs, 5);
            assert_eq!(config.default_sort, SortOrder::Ip);
            assert_eq!(config.log_level, "info");
            Ok(())
        });
    }
}

//! Top-level bugloc configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{FusionConfig, StorageConfig};
use crate::constants;
use crate::errors::ConfigError;
use crate::types::{BugOrder, FusionWeights};

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `CliOverrides`)
/// 2. Environment variables (`BUGLOC_*`)
/// 3. Project config (`bugloc.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BuglocConfig {
    pub fusion: FusionConfig,
    pub storage: StorageConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub product_name: Option<String>,
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub concurrency: Option<usize>,
    pub order_by_fixed_date: Option<bool>,
    pub db_path: Option<String>,
}

/// Validated, fully resolved parameters of one fusion run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSettings {
    pub product: String,
    pub weights: FusionWeights,
    pub workers: usize,
    pub order: BugOrder,
}

impl BuglocConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(constants::PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Ok(config)
    }

    /// Load a single explicit config file on top of the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        Self::merge_toml_file(&mut config, path)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve().map(|_| ())
    }

    /// Validate and resolve into the parameters a fusion run consumes.
    pub fn resolve(&self) -> Result<RunSettings, ConfigError> {
        let product = match self.fusion.product_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(ConfigError::ValidationFailed {
                    field: "fusion.product_name".to_string(),
                    message: "must be set to a non-empty product name".to_string(),
                })
            }
        };

        let weights =
            FusionWeights::new(self.fusion.effective_alpha(), self.fusion.effective_beta())?;

        if let Some(concurrency) = self.fusion.concurrency {
            if concurrency > constants::MAX_CONCURRENCY {
                return Err(ConfigError::ValidationFailed {
                    field: "fusion.concurrency".to_string(),
                    message: format!("must be at most {}", constants::MAX_CONCURRENCY),
                });
            }
        }

        if self.storage.read_pool_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "storage.read_pool_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(RunSettings {
            product,
            weights,
            workers: self.fusion.effective_workers(),
            order: self.fusion.effective_order(),
        })
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut BuglocConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: BuglocConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut BuglocConfig, other: &BuglocConfig) {
        if other.fusion.product_name.is_some() {
            base.fusion.product_name = other.fusion.product_name.clone();
        }
        if other.fusion.alpha.is_some() {
            base.fusion.alpha = other.fusion.alpha;
        }
        if other.fusion.beta.is_some() {
            base.fusion.beta = other.fusion.beta;
        }
        if other.fusion.concurrency.is_some() {
            base.fusion.concurrency = other.fusion.concurrency;
        }
        if other.fusion.order_by_fixed_date.is_some() {
            base.fusion.order_by_fixed_date = other.fusion.order_by_fixed_date;
        }

        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }
    }

    /// Apply environment variable overrides. Unparsable numbers are errors.
    fn apply_env_overrides(config: &mut BuglocConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("BUGLOC_PRODUCT") {
            config.fusion.product_name = Some(val);
        }
        if let Some(v) = parse_env::<f64>("BUGLOC_ALPHA")? {
            config.fusion.alpha = Some(v);
        }
        if let Some(v) = parse_env::<f64>("BUGLOC_BETA")? {
            config.fusion.beta = Some(v);
        }
        if let Some(v) = parse_env::<usize>("BUGLOC_CONCURRENCY")? {
            config.fusion.concurrency = Some(v);
        }
        if let Ok(val) = std::env::var("BUGLOC_DB_PATH") {
            config.storage.db_path = Some(val);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut BuglocConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.product_name {
            config.fusion.product_name = Some(v.clone());
        }
        if let Some(v) = cli.alpha {
            config.fusion.alpha = Some(v);
        }
        if let Some(v) = cli.beta {
            config.fusion.beta = Some(v);
        }
        if let Some(v) = cli.concurrency {
            config.fusion.concurrency = Some(v);
        }
        if let Some(v) = cli.order_by_fixed_date {
            config.fusion.order_by_fixed_date = Some(v);
        }
        if let Some(ref v) = cli.db_path {
            config.storage.db_path = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field: key.to_string(),
                message: format!("{val:?}: {e}"),
            }),
        Err(_) => Ok(None),
    }
}

use crate::error::Result;
use crate::utils::constants::{CONFIG_FILE, DEFAULT_SIGNIFICANCE_LEVEL, ENV_PREFIX};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

/// Settings for the command-line front end
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalyticsConfig {
    /// Dataset to load when `--data` is not given
    pub data_path: Option<PathBuf>,

    pub default_year: Option<i32>,

    #[serde(default)]
    pub default_stations: Vec<String>,

    #[validate(range(exclusive_min = 0.0, exclusive_max = 1.0))]
    pub significance_level: f64,

    #[validate(range(min = 1))]
    pub max_workers: usize,
}

impl AnalyticsConfig {
    /// Defaults, then the TOML file (`airq.toml` unless `path` is given), then
    /// `AIRQ_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(CONFIG_FILE).required(false),
        };

        let config: AnalyticsConfig = Config::builder()
            .set_default("significance_level", DEFAULT_SIGNIFICANCE_LEVEL)?
            .set_default("max_workers", num_cpus::get() as i64)?
            .add_source(file)
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }
}

/// `AIRQ_DEFAULT_STATIONS=Dongsi,Tiantan` becomes a list; other keys stay scalar
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("default_stations")
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            default_year: None,
            default_stations: Vec::new(),
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
            max_workers: num_cpus::get(),
        }
    }
}

//! Layered configuration: defaults, then an optional config file, then
//! `KOPPEN_*` environment variables, then command-line overrides.
//!
//! The top-level `input_path`/`output_path` pair describes the encode step
//! (text table in, grid document out). The `[normalize]` section names the
//! documents of the key rewrite; where it is empty, normalize reads the encoded
//! grid and rewrites it in place. Nested keys come from the environment with a
//! double underscore, e.g. `KOPPEN_NORMALIZE__OUTPUT_PATH`.

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{DEFAULT_KEY_PRECISION, DEFAULT_SEARCH_RADIUS_DEG, ENV_PREFIX};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Source and destination documents of one processing step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

impl PathConfig {
    /// Apply command-line paths over the configured ones
    pub fn with_overrides(mut self, input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        if input.is_some() {
            self.input_path = input;
        }
        if output.is_some() {
            self.output_path = output;
        }
        self
    }

    pub fn input_path(&self) -> Result<&Path> {
        self.input_path.as_deref().ok_or_else(|| {
            ProcessingError::MissingData(
                "input path (pass it on the command line, set it in the config file, or use KOPPEN_* variables)"
                    .to_string(),
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GridConfig {
    /// Source text table of the encode step
    pub input_path: Option<PathBuf>,

    /// Grid document written by the encode step
    pub output_path: Option<PathBuf>,

    /// Documents read and written by the key rewrite
    pub normalize: PathConfig,

    /// Decimals used when formatting lookup keys
    #[validate(range(max = 6))]
    pub key_precision: usize,

    /// Nearest-cell search radius for lookups, in degrees
    #[validate(range(min = 0.0, max = 10.0))]
    pub search_radius: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            input_path: None,
            output_path: None,
            normalize: PathConfig::default(),
            key_precision: DEFAULT_KEY_PRECISION,
            search_radius: DEFAULT_SEARCH_RADIUS_DEG,
        }
    }
}

impl GridConfig {
    /// Load configuration from `config_file` (if given) and the environment
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("key_precision", DEFAULT_KEY_PRECISION as i64)?
            .set_default("search_radius", DEFAULT_SEARCH_RADIUS_DEG)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }

        let config: GridConfig = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Table and grid document of the encode step
    pub fn encode_paths(&self) -> PathConfig {
        PathConfig {
            input_path: self.input_path.clone(),
            output_path: self.output_path.clone(),
        }
    }

    /// Documents of the key rewrite; the input falls back to the encoded grid
    pub fn normalize_paths(&self) -> PathConfig {
        PathConfig {
            input_path: self
                .normalize
                .input_path
                .clone()
                .or_else(|| self.output_path.clone()),
            output_path: self.normalize.output_path.clone(),
        }
    }

    /// Grid document consulted by lookups and summaries: the newest one configured
    pub fn grid_path(&self) -> PathConfig {
        PathConfig {
            input_path: self
                .normalize
                .output_path
                .clone()
                .or_else(|| self.normalize_paths().input_path),
            output_path: None,
        }
    }

    pub fn with_key_precision(mut self, precision: Option<usize>) -> Result<Self> {
        if let Some(precision) = precision {
            self.key_precision = precision;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn with_search_radius(mut self, radius: Option<f64>) -> Result<Self> {
        if let Some(radius) = radius {
            self.search_radius = radius;
        }
        self.validate()?;
        Ok(self)
    }
}

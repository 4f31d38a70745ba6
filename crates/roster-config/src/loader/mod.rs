//! Config loading: a single file, or a small stack of overriding layers.
//!
//! The stack is, from lowest to highest precedence, the user file
//! (`~/.roster/roster.json5`), `roster.json5` in the working directory, and any
//! runtime files passed explicitly. Every layer is schema-checked on its own so
//! errors name the file that caused them; the merged result is then decoded
//! and validated as a whole.

mod discovery;
mod merge;
mod schema;


use crate::{ConfigError, RosterConfig};
use log::{debug, info};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// File name looked up in the user directory and the working directory.
const CONFIG_FILE_NAME: &str = "roster.json5";
/// Directory under `$HOME` holding the user layer.
const USER_CONFIG_DIR: &str = ".roster";

/// Merged config plus the layers it was built from.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub config: RosterConfig,
    /// Layers that were found and applied, lowest precedence first.
    pub layers: Vec<ConfigLayer>,
}

/// Where a layer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// `~/.roster/roster.json5`.
    User,
    /// `roster.json5` in the working directory.
    Cwd,
    /// A file named explicitly by the caller; it must exist.
    Runtime,
}

impl ConfigLayerSource {
    fn label(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Cwd => "cwd",
            Self::Runtime => "runtime",
        }
    }
}

/// An applied layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayer {
    pub source: ConfigLayerSource,
    pub path: PathBuf,
}

/// Inputs for [`RosterConfig::load_layered_with_options`].
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    /// Directory searched for the cwd layer.
    pub cwd: PathBuf,
    /// User layer location; `None` skips it.
    pub user_config_path: Option<PathBuf>,
    /// Runtime files applied last, in order.
    pub runtime_paths: Vec<PathBuf>,
}

impl LayeredConfigOptions {
    /// Default user layer plus the cwd layer for `cwd`, no runtime files.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            user_config_path: discovery::user_config_path(),
            runtime_paths: Vec::new(),
        }
    }

    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }
}

impl RosterConfig {
    /// Load one config file with no layering.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading config from path: {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }

    /// Load a config from JSON5 text.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        schema::validate_layer_schema(&value, "config")?;
        decode(value)
    }

    /// Load the user and cwd layers for `cwd`.
    pub fn load_layered(cwd: impl AsRef<Path>) -> Result<LayeredConfig, ConfigError> {
        Self::load_layered_with_options(LayeredConfigOptions::new(cwd))
    }

    /// Load, merge, and validate the layers described by `options`.
    ///
    /// Optional layers that do not exist are skipped. A file reached through
    /// two sources (cwd is `~/.roster`, say) is applied once.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let mut merged = Value::Object(Map::new());
        let mut layers = Vec::new();
        let mut applied = HashSet::new();

        for candidate in discovery::candidates(&options) {
            if !applied.insert(discovery::identity(&candidate.path)) {
                debug!(
                    "config layer already applied (source={:?}, path={})",
                    candidate.source,
                    candidate.path.display()
                );
                continue;
            }
            let Some(value) = discovery::read(&candidate)? else {
                continue;
            };
            merge::overlay(&mut merged, value);
            layers.push(ConfigLayer {
                source: candidate.source,
                path: candidate.path,
            });
        }

        let config = decode(merged)?;
        info!("layered config loaded (layers={})", layers.len());
        Ok(LayeredConfig { config, layers })
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.remote.base_url).map_err(|err| ConfigError::InvalidField {
            path: "remote.base_url".to_string(),
            message: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidField {
                path: "remote.base_url".to_string(),
                message: format!("unsupported scheme: {}", url.scheme()),
            });
        }

        let mut declared = HashSet::new();
        for field in &self.form.fields {
            if field.name.is_empty() {
                return Err(ConfigError::Invalid(
                    "form fields require a non-empty name".to_string(),
                ));
            }
            if !declared.insert(field.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate form field: {}",
                    field.name
                )));
            }
        }

        if let Some(rule) = self
            .validation
            .required
            .iter()
            .find(|rule| !declared.contains(rule.field.as_str()))
        {
            return Err(ConfigError::Invalid(format!(
                "required rule targets undeclared form field: {}",
                rule.field
            )));
        }
        Ok(())
    }
}

fn decode(value: Value) -> Result<RosterConfig, ConfigError> {
    let config: RosterConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}

//! Locating and reading individual config layers.

use super::{CONFIG_FILE_NAME, ConfigLayerSource, LayeredConfigOptions, USER_CONFIG_DIR, schema};
use crate::ConfigError;
use directories::UserDirs;
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A layer that may or may not exist on disk.
#[derive(Debug)]
pub(super) struct Candidate {
    pub(super) source: ConfigLayerSource,
    pub(super) path: PathBuf,
}

/// `~/.roster/roster.json5`, when a home directory is known.
pub(super) fn user_config_path() -> Option<PathBuf> {
    UserDirs::new().map(|dirs| dirs.home_dir().join(USER_CONFIG_DIR).join(CONFIG_FILE_NAME))
}

/// Layers in precedence order, lowest first.
pub(super) fn candidates(options: &LayeredConfigOptions) -> Vec<Candidate> {
    let user = options.user_config_path.iter().map(|path| Candidate {
        source: ConfigLayerSource::User,
        path: path.clone(),
    });
    let cwd = std::iter::once(Candidate {
        source: ConfigLayerSource::Cwd,
        path: options.cwd.join(CONFIG_FILE_NAME),
    });
    let runtime = options.runtime_paths.iter().map(|path| Candidate {
        source: ConfigLayerSource::Runtime,
        path: path.clone(),
    });
    user.chain(cwd).chain(runtime).collect()
}

/// Key under which a layer counts as already applied.
pub(super) fn identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Read and schema-check one layer.
///
/// A missing user or cwd file yields `Ok(None)`; a missing runtime file is an
/// error.
pub(super) fn read(candidate: &Candidate) -> Result<Option<Value>, ConfigError> {
    let Candidate { source, path } = candidate;
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err)
            if err.kind() == std::io::ErrorKind::NotFound
                && *source != ConfigLayerSource::Runtime =>
        {
            debug!(
                "config layer not present (source={:?}, path={})",
                source,
                path.display()
            );
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    debug!("read config layer (source={:?}, path={})", source, path.display());
    let value: Value = json5::from_str(&contents)?;
    schema::validate_layer_schema(&value, &format!("{}({})", source.label(), path.display()))?;
    Ok(Some(value))
}

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read from `jmdict-sqlite.toml`; command-line flags take precedence
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// tracing filter directive, e.g. "info" or "jmdict_sqlite=debug"
    pub log: Option<String>,
    pub fresh: bool,
    pub quiet: bool,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("jmdict-sqlite.toml")
}

/// Load the config file
///
/// A missing default file yields `None`; a missing file that was asked for
/// explicitly is an error.
pub fn load_config(path: Option<&Path>) -> Result<Option<ConverterConfig>> {
    let explicit = path.is_some();
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        if explicit {
            return Err(Error::Config(format!("{} does not exist", path.display())));
        }
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ConverterConfig = toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    Ok(Some(config))
}

pub fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

//! Loading of table data, column descriptors and table options.
//!
//! Files ending in `.yaml` or `.yml` are read as YAML, everything else as
//! JSON.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use gridview_types::{ColumnDescriptor, Row, TableOptions};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Environment variable naming the theme when `--theme` is not given.
pub const THEME_ENV: &str = "GRIDVIEW_THEME";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{path} must contain a list of objects")]
    NotRows { path: PathBuf },
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if is_yaml(path) {
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Table options from `path`, or the defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> Result<TableOptions, ConfigError> {
    let Some(path) = path else {
        return Ok(TableOptions::default());
    };
    let options: TableOptions = read_document(path)?;
    debug!(path = %path.display(), passthrough = options.rest.len(), "Loaded table options");
    Ok(options)
}

pub fn load_columns(path: &Path) -> Result<Vec<ColumnDescriptor>, ConfigError> {
    read_document(path)
}

/// Rows from a document holding an array of objects.
pub fn load_rows(path: &Path) -> Result<Vec<Row>, ConfigError> {
    let document: Value = read_document(path)?;
    let Value::Array(items) = document else {
        return Err(ConfigError::NotRows { path: path.to_path_buf() });
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(row) => Ok(row),
            _ => Err(ConfigError::NotRows { path: path.to_path_buf() }),
        })
        .collect()
}

/// Theme chosen on the command line, falling back to [`THEME_ENV`].
pub fn theme_override(cli_theme: Option<&str>) -> Option<String> {
    let from_env = env::var(THEME_ENV).ok();
    pick_theme(cli_theme, from_env.as_deref())
}

fn pick_theme(cli_theme: Option<&str>, env_theme: Option<&str>) -> Option<String> {
    [cli_theme, env_theme]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty())
        .map(str::to_string)
}

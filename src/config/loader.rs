use std::path::Path;

use tracing::debug;

use crate::error::{AppError, AppResult, ConfigError};

use super::types::SuiteFile;
use super::validate::validate_suite;

/// Loads and validates a suite file. The format follows the extension.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed, or when a case
/// is incomplete.
pub fn load_suite(path: &str) -> AppResult<SuiteFile> {
    let suite = load_suite_file(Path::new(path))?;
    validate_suite(&suite).map_err(AppError::config)?;
    debug!("Loaded {} case(s) from {}", suite.cases.len(), path);
    Ok(suite)
}

pub(crate) fn load_suite_file(path: &Path) -> AppResult<SuiteFile> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::config(ConfigError::MissingExtension)),
    }
}

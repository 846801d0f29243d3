//! Config file upgrades: detect keys added by newer releases and fill them in.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Top-level keys a current config file carries.
pub const KNOWN_KEYS: [&str; 6] = [
    "database",
    "employee_name",
    "default_project_description",
    "annual_leave_entitlement_hours",
    "separator_char",
    "rules",
];

/// Keys of `KNOWN_KEYS` absent from the YAML document `content`.
pub fn missing_keys(content: &str) -> AppResult<Vec<&'static str>> {
    let yaml: Value = serde_yaml::from_str(content)?;

    let map = match yaml.as_mapping() {
        Some(m) => m,
        // an empty file parses as null
        None if yaml.is_null() => return Ok(KNOWN_KEYS.to_vec()),
        None => {
            return Err(AppError::Config(
                "configuration file is not a YAML mapping".to_string(),
            ));
        }
    };

    Ok(KNOWN_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .collect())
}

/// Rewrite `path` with every missing key set to its default, keeping the
/// values already present. Returns the keys that were added.
pub fn fill_missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let missing = missing_keys(&content)?;

    if missing.is_empty() {
        return Ok(missing);
    }

    let cfg: Config = if content.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml::from_str(&content)?
    };
    cfg.save_to(path)?;

    Ok(missing)
}

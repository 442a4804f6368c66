//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MARMITA_DATA_DIR` - Directory holding the preference snapshot (default: `.marmita`)
//! - `MARMITA_PREFERENCES_KEY` - Snapshot key (default: `userPreferences`)
//! - `MARMITA_CATALOG` - Product catalog YAML file (default: `menu.yaml`)

use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_DATA_DIR: &str = ".marmita";
pub const DEFAULT_PREFERENCES_KEY: &str = "userPreferences";
pub const DEFAULT_CATALOG: &str = "menu.yaml";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory the durable preference snapshot lives in
    pub data_dir: PathBuf,
    /// Key naming the preference snapshot inside `data_dir`
    pub preferences_key: String,
    /// Product catalog file
    pub catalog_path: PathBuf,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            preferences_key: DEFAULT_PREFERENCES_KEY.to_string(),
            catalog_path: PathBuf::from(DEFAULT_CATALOG),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let data_dir = get("MARMITA_DATA_DIR", DEFAULT_DATA_DIR);
        if data_dir.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "MARMITA_DATA_DIR".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let preferences_key = get("MARMITA_PREFERENCES_KEY", DEFAULT_PREFERENCES_KEY);
        validate_key(&preferences_key, "MARMITA_PREFERENCES_KEY")?;

        let catalog_path = get("MARMITA_CATALOG", DEFAULT_CATALOG);

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            preferences_key,
            catalog_path: PathBuf::from(catalog_path),
        })
    }
}

/// A snapshot key becomes a file name, so it must be a single path segment.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for an empty key, `.`/`..`, or a key
/// containing a path separator.
pub fn validate_key(key: &str, var_name: &str) -> Result<(), ConfigError> {
    if key.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must not be empty".to_string(),
        ));
    }
    if key.contains(['/', '\\']) || key == "." || key == ".." {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("{key:?} must be a plain name, not a path"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.preferences_key, "userPreferences");
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("MARMITA_DATA_DIR", "/var/lib/marmita"),
            ("MARMITA_PREFERENCES_KEY", "prefs"),
            ("MARMITA_CATALOG", "cardapio.yaml"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/marmita"));
        assert_eq!(config.preferences_key, "prefs");
        assert_eq!(config.catalog_path, PathBuf::from("cardapio.yaml"));
    }

    #[test]
    fn test_key_with_path_separator_rejected() {
        let result =
            StorefrontConfig::from_lookup(lookup_from(&[("MARMITA_PREFERENCES_KEY", "../etc")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(var, _)) if var == "MARMITA_PREFERENCES_KEY"));
    }

    #[test]
    fn test_empty_values_rejected() {
        assert!(StorefrontConfig::from_lookup(lookup_from(&[("MARMITA_DATA_DIR", " ")])).is_err());
        assert!(
            StorefrontConfig::from_lookup(lookup_from(&[("MARMITA_PREFERENCES_KEY", "")])).is_err()
        );
    }
}

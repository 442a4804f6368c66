//! Preference snapshot commands.

use std::io::Write;

use marmita_storefront::{FileSnapshotStore, PreferenceStore, StorefrontConfig, UserPreferences};
use tracing::info;

fn open_store(config: &StorefrontConfig) -> PreferenceStore<FileSnapshotStore> {
    PreferenceStore::new(
        FileSnapshotStore::new(&config.data_dir),
        config.preferences_key.clone(),
    )
}

/// Print the stored preferences as JSON.
///
/// A missing or malformed snapshot prints the empty defaults.
///
/// # Errors
///
/// Returns an error if stdout is closed.
pub fn show(config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let prefs = open_store(config).load();
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", serde_json::to_string_pretty(&prefs)?)?;
    Ok(())
}

/// Overwrite the stored preferences.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be written.
pub fn register(
    config: &StorefrontConfig,
    allergies: &[String],
    goals: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let prefs = UserPreferences::new(allergies, goals);
    open_store(config).save(&prefs)?;

    info!(
        path = %config.data_dir.display(),
        key = %config.preferences_key,
        "Preferences registered"
    );
    Ok(())
}

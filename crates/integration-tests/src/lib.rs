//! Integration tests for Marmita.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p marmita-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - End-to-end cart, allergy, and checkout flows
//! - `preference_persistence` - Snapshot files across sessions
//! - `log_privacy` - Allergy data stays out of info-level logs
//!
//! Shared fixtures live here so each test file builds sessions the same way.

use std::path::PathBuf;

use marmita_core::Price;
use marmita_storefront::{
    Catalog, FileSnapshotStore, MemorySnapshotStore, PreferenceStore, Product, RecordingRenderer,
    Session,
};

pub const PREFERENCES_KEY: &str = "userPreferences";

/// The sample menu used across scenarios.
///
/// # Panics
///
/// Panics if the fixture products stop passing catalog validation.
#[must_use]
pub fn menu() -> Catalog {
    Catalog::new(vec![
        Product::new("p1", "Salad", Price::from_centavos(1250), "Gluten, Dairy"),
        Product::new("p2", "Bowl", Price::from_centavos(2190), "peanut,protein"),
        Product::new("p3", "Tilápia", Price::from_centavos(2400), "fish, low-carb"),
        Product::new("p4", "Suco Verde", Price::from_centavos(800), ""),
    ])
    .expect("fixture menu is valid")
}

/// A session backed by an in-memory snapshot store.
#[must_use]
pub fn memory_session() -> Session<MemorySnapshotStore, RecordingRenderer> {
    Session::start(
        menu(),
        PreferenceStore::new(MemorySnapshotStore::new(), PREFERENCES_KEY),
        RecordingRenderer::new(),
    )
}

/// A session whose preferences live under `dir`.
#[must_use]
pub fn file_session(dir: &std::path::Path) -> Session<FileSnapshotStore, RecordingRenderer> {
    Session::start(
        menu(),
        PreferenceStore::new(FileSnapshotStore::new(dir), PREFERENCES_KEY),
        RecordingRenderer::new(),
    )
}

/// A fresh, unique directory path under the system temp dir (not created).
#[must_use]
pub fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("marmita-it-{}", uuid::Uuid::new_v4()))
}

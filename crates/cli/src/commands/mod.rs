//! Subcommand implementations.

pub mod menu;
pub mod prefs;
pub mod session;

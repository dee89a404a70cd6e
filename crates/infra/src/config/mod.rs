//! Gateway, draft-store and sync settings
//!
//! Environment variables take precedence; a TOML or JSON file is the
//! fallback. See [`loader`] for the variable names and probed paths.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};

//! Parsing of remapping configuration files.
//!
//! This module turns user-authored YAML into the typed [`crate::models::RemapConfig`].

pub mod remap;

// Re-export commonly used functions
pub use remap::{load_remap_config, parse_remap_config};

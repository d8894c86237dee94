//! karabingen library
//!
//! This library provides the core of karabingen: parsing YAML remapping
//! configs, compiling them into Karabiner-Elements rules and merging those
//! rules into karabiner.json.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod generator;
pub mod models;
pub mod parser;

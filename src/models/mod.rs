//! Data models for remapping configuration and the target rule schema.
//!
//! This module contains the core data structures used throughout the application.
//! Models are independent of file I/O and of the CLI.

pub mod action;
pub mod remap;
pub mod rule;

// Re-export all model types
pub use action::{ActionDescriptor, ActionKind};
pub use remap::{
    ConflictPolicy, KeyBinding, KeybindingsConfig, LayerConfig, MouseButtonsConfig, RemapConfig,
    Terminal, TmuxJumpConfig,
};
pub use rule::{
    Condition, FlagVariable, FromEvent, KeyCode, Manipulator, Modifiers, OpenApplication, Rule,
    SetVariable, SimpleModification, SoftwareFunction, ToEvent,
};

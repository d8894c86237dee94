//! Rule generation.
//!
//! This module turns a [`crate::models::RemapConfig`] into Karabiner-Elements
//! complex modification rules and merges them into karabiner.json.
//! Everything except `document` and `TmuxEnvironment::detect` is pure.

pub mod compiler;
pub mod document;
pub mod hyper;
pub mod option;
pub mod sublayer;
pub mod tmux;
pub mod utility;
pub mod validator;

// Re-export generator types
pub use compiler::{CompiledLayout, RuleCompiler};
pub use document::{assemble, default_document_path, merge_layout, DocumentOptions, WriteOutcome};
pub use tmux::TmuxEnvironment;
pub use validator::{ConfigValidator, ConflictKind, KeyConflict, ValidationReport};

//! Key conflict detection before compilation.
//!
//! Conflicts are configurations where two features claim the same physical
//! key, so one of the emitted rules can never fire. Whether a conflict is an
//! error or a warning depends on the configured [`ConflictPolicy`].

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use crate::generator::hyper::HHKB_SOURCE_KEY;
use crate::models::{ConflictPolicy, RemapConfig};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Keys taken by the fixed Option + H/J/K/L/M arrow rule.
const OPTION_ARROW_KEYS: [&str; 5] = ["h", "j", "k", "l", "m"];

/// Category of key conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// HHKB mode and the hyper key both claim caps lock
    HyperKeyShadowed,
    /// Two sublayers use the same trigger key
    DuplicateLayerKey,
    /// A sublayer trigger is the hyper key itself
    LayerKeyIsHyperKey,
    /// An option binding takes a key of the option arrow rule
    OptionShadowsArrow,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HyperKeyShadowed => write!(f, "Hyper key shadowed"),
            Self::DuplicateLayerKey => write!(f, "Duplicate sublayer key"),
            Self::LayerKeyIsHyperKey => write!(f, "Sublayer key is hyper key"),
            Self::OptionShadowsArrow => write!(f, "Option binding shadows arrow"),
        }
    }
}

/// A detected conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyConflict {
    /// Type of conflict
    pub kind: ConflictKind,
    /// Physical key involved
    pub key: String,
    /// Human-readable explanation
    pub message: String,
}

impl KeyConflict {
    /// Creates a new conflict.
    pub fn new(kind: ConflictKind, key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for KeyConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.key, self.kind, self.message)
    }
}

/// Validation result split by severity.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Conflicts that prevent compilation
    pub errors: Vec<KeyConflict>,
    /// Conflicts resolved by precedence
    pub warnings: Vec<KeyConflict>,
}

impl ValidationReport {
    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Formats the report as a user-friendly message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("❌ {} key conflicts:\n", self.errors.len()));
            for (idx, error) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, error));
            }
        }

        if !self.warnings.is_empty() {
            message.push_str(&format!("⚠️  {} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning));
            }
        }

        message
    }
}

/// Detects key conflicts in a remapping configuration.
pub struct ConfigValidator<'a> {
    config: &'a RemapConfig,
}

impl<'a> ConfigValidator<'a> {
    /// Creates a validator for `config`.
    #[must_use]
    pub const fn new(config: &'a RemapConfig) -> Self {
        Self { config }
    }

    /// Runs every check and sorts the findings by the configured policy.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let conflicts = self.conflicts();
        match self.config.key_conflict {
            ConflictPolicy::Reject => ValidationReport {
                errors: conflicts,
                warnings: Vec::new(),
            },
            ConflictPolicy::Precedence | ConflictPolicy::AllowBoth => ValidationReport {
                errors: Vec::new(),
                warnings: conflicts,
            },
        }
    }

    /// All conflicts, regardless of policy.
    #[must_use]
    pub fn conflicts(&self) -> Vec<KeyConflict> {
        let mut conflicts = Vec::new();
        self.check_hyper_key(&mut conflicts);
        self.check_layer_keys(&mut conflicts);
        self.check_option_bindings(&mut conflicts);
        conflicts
    }

    fn check_hyper_key(&self, conflicts: &mut Vec<KeyConflict>) {
        if self.config.use_hhkb && self.config.hyperkey == HHKB_SOURCE_KEY {
            let resolution = match self.config.key_conflict {
                ConflictPolicy::AllowBoth => "both rules are emitted; the HHKB rule wins",
                _ => "the hyper key rule is skipped",
            };
            conflicts.push(KeyConflict::new(
                ConflictKind::HyperKeyShadowed,
                HHKB_SOURCE_KEY,
                format!("use_hhkb remaps caps_lock to left_control and hyperkey is caps_lock; {resolution}"),
            ));
        }
    }

    fn check_layer_keys(&self, conflicts: &mut Vec<KeyConflict>) {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for layer in &self.config.keybindings.layers {
            *counts.entry(layer.key.as_str()).or_default() += 1;

            if layer.key == self.config.hyperkey {
                conflicts.push(KeyConflict::new(
                    ConflictKind::LayerKeyIsHyperKey,
                    layer.key.clone(),
                    "sublayer trigger cannot be pressed while the same key acts as hyper",
                ));
            }
        }

        for (key, count) in counts.into_iter().filter(|(_, count)| *count > 1) {
            conflicts.push(KeyConflict::new(
                ConflictKind::DuplicateLayerKey,
                key,
                format!("{count} sublayers share this trigger and its flag variable"),
            ));
        }
    }

    fn check_option_bindings(&self, conflicts: &mut Vec<KeyConflict>) {
        for key in self.config.keybindings.option.keys() {
            if OPTION_ARROW_KEYS.contains(&key.as_str()) {
                conflicts.push(KeyConflict::new(
                    ConflictKind::OptionShadowsArrow,
                    key.clone(),
                    "left_option binding comes first and takes over the option arrow mapping",
                ));
            }
        }
    }
}

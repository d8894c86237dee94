//! Left Option + key bindings.

use crate::models::{FromEvent, KeyBinding, Manipulator, Rule};
use std::collections::BTreeMap;

/// Modifier that must be held for an option binding.
pub const OPTION_MODIFIER: &str = "left_option";

/// Modifier allowed alongside, so the binding also fires while hyper is held.
pub const OPTION_OPTIONAL_MODIFIER: &str = "caps_lock";

/// Builds the rule for a single option binding.
#[must_use]
pub fn option_binding_rule(key: &str, binding: &KeyBinding) -> Rule {
    let action = binding.action();
    let manipulator = Manipulator::basic(
        FromEvent::key(key)
            .mandatory([OPTION_MODIFIER])
            .optional([OPTION_OPTIONAL_MODIFIER]),
    )
    .to(action.to_event());

    Rule::new(format!("Option+{key} → {action}"), vec![manipulator])
}

/// Builds one rule per binding, ordered by key.
#[must_use]
pub fn option_binding_rules(bindings: &BTreeMap<String, KeyBinding>) -> Vec<Rule> {
    bindings
        .iter()
        .map(|(key, binding)| option_binding_rule(key, binding))
        .collect()
}

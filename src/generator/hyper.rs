//! Hyper key and alternate modifier rules.
//!
//! The hyper key is a single manipulator that raises the `hyper` flag while
//! held and emits escape when tapped alone. The alternate modifier rule remaps
//! a physical key (caps lock, HHKB style) to another modifier.

use crate::constants::HYPER_VARIABLE;
use crate::models::{FlagVariable, FromEvent, Manipulator, Rule, ToEvent};

/// Physical key repurposed by HHKB mode.
pub const HHKB_SOURCE_KEY: &str = "caps_lock";

/// Modifier HHKB mode maps to.
pub const HHKB_TARGET_KEY: &str = "left_control";

/// Key emitted when the hyper key is tapped alone.
pub const HYPER_TAP_KEY: &str = "escape";

/// The flag raised while the hyper key is held.
#[must_use]
pub fn hyper_flag() -> FlagVariable {
    FlagVariable::new(HYPER_VARIABLE)
}

/// Builds the hyper key rule for `hyper_key`.
///
/// No guards: this is the only handler for the key's raw effect.
#[must_use]
pub fn hyper_key_rule(hyper_key: &str) -> Rule {
    let flag = hyper_flag();
    let manipulator = Manipulator::basic(FromEvent::key(hyper_key))
        .with_description(format!("{hyper_key} -> Hyper Key"))
        .to(flag.set(1))
        .to_after_key_up(flag.set(0))
        .to_if_alone(ToEvent::key(HYPER_TAP_KEY));

    Rule::new(format!("Hyper Key ({hyper_key})"), vec![manipulator])
}

/// Builds an unconditional remap of `from` to the modifier `to`.
#[must_use]
pub fn alternate_modifier_rule(from: &str, to: &str) -> Rule {
    let label = format!("{} -> {}", title_case(from), title_case(to));
    let manipulator = Manipulator::basic(FromEvent::key(from))
        .with_description(label.clone())
        .to(ToEvent::key(to));

    Rule::new(format!("HHKB Mode ({label})"), vec![manipulator])
}

/// HHKB mode: caps lock becomes left control.
#[must_use]
pub fn hhkb_mode_rule() -> Rule {
    alternate_modifier_rule(HHKB_SOURCE_KEY, HHKB_TARGET_KEY)
}

/// `left_control` -> `Left Control`
fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

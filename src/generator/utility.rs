//! Fixed utility rules.
//!
//! Each builder is total over its parameters and returns exactly one rule.
//! None of them read or write flag variables.

use crate::constants::SAFARI_BUNDLE_PATTERN;
use crate::models::{Condition, FromEvent, Manipulator, Rule, ToEvent};

/// Key code that swallows the event.
const VK_NONE: &str = "vk_none";

/// Option + H/J/K/L -> arrows, Option + M -> return.
#[must_use]
pub fn option_arrows_rule() -> Rule {
    const ARROWS: [(&str, &str); 5] = [
        ("h", "left_arrow"),
        ("j", "down_arrow"),
        ("k", "up_arrow"),
        ("l", "right_arrow"),
        ("m", "return_or_enter"),
    ];

    let manipulators = ARROWS
        .iter()
        .map(|(from, to)| {
            Manipulator::basic(FromEvent::key(*from).mandatory(["option"])).to(ToEvent::key(*to))
        })
        .collect();

    Rule::new("Map Option + H/J/K/L to Arrow Keys", manipulators)
}

/// Command + Option + L/H -> next/previous tab.
#[must_use]
pub fn switch_tabs_rule() -> Rule {
    let next = Manipulator::basic(FromEvent::key("l").mandatory(["command", "option"]))
        .with_description("⌘+⌥+l → Next Tab (⌃+Tab)")
        .to(ToEvent::key_with("tab", ["control"]));

    let previous = Manipulator::basic(FromEvent::key("h").mandatory(["command", "option"]))
        .with_description("⌘+⌥+h → Previous Tab (⌃+⇧+Tab)")
        .to(ToEvent::key_with("tab", ["control", "shift"]));

    Rule::new("Remap ⌘+⌥+H/L to switch tabs", vec![next, previous])
}

/// Swallows Command + Tab.
#[must_use]
pub fn disable_command_tab_rule() -> Rule {
    let manipulator =
        Manipulator::basic(FromEvent::key("tab").mandatory(["command"])).to(ToEvent::key(VK_NONE));

    Rule::new("Disable Command + Tab", vec![manipulator])
}

/// Swallows left control.
#[must_use]
pub fn disable_left_ctrl_rule() -> Rule {
    let manipulator = Manipulator::basic(FromEvent::key("left_control"))
        .with_description("Left Control -> None")
        .to(ToEvent::key(VK_NONE));

    Rule::new("Disable Left Control", vec![manipulator])
}

/// Maps mouse side buttons to Back (⌘[) and Forward (⌘]).
///
/// With `safari_only` both manipulators are guarded by Safari being frontmost.
#[must_use]
pub fn mouse_buttons_rule(safari_only: bool, back_button: &str, forward_button: &str) -> Rule {
    let conditions = if safari_only {
        vec![Condition::FrontmostApplicationIf {
            bundle_identifiers: vec![SAFARI_BUNDLE_PATTERN.to_string()],
        }]
    } else {
        Vec::new()
    };

    let back = Manipulator::basic(FromEvent::button(back_button))
        .with_description("G502 Back → ⌘[")
        .to(ToEvent::key_with("open_bracket", ["command"]))
        .with_conditions(conditions.clone());

    let forward = Manipulator::basic(FromEvent::button(forward_button))
        .with_description("G502 Forward → ⌘]")
        .to(ToEvent::key_with("close_bracket", ["command"]))
        .with_conditions(conditions);

    Rule::new("G502: map side buttons to Safari Back/Forward", vec![back, forward])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_option_arrows() {
        let rule = option_arrows_rule();
        assert_eq!(rule.manipulators.len(), 5);
        let value = serde_json::to_value(&rule.manipulators[0]).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "basic",
                "from": {"key_code": "h", "modifiers": {"mandatory": ["option"]}},
                "to": [{"key_code": "left_arrow"}]
            })
        );
        assert_eq!(rule.manipulators[4].to, vec![ToEvent::key("return_or_enter")]);
    }

    #[test]
    fn test_switch_tabs() {
        let rule = switch_tabs_rule();
        assert_eq!(rule.manipulators.len(), 2);
        assert_eq!(
            rule.manipulators[1].to,
            vec![ToEvent::key_with("tab", ["control", "shift"])]
        );
    }

    #[test]
    fn test_disable_rules_emit_vk_none() {
        for rule in [disable_command_tab_rule(), disable_left_ctrl_rule()] {
            assert_eq!(rule.manipulators[0].to, vec![ToEvent::key("vk_none")]);
        }
    }

    #[test]
    fn test_mouse_buttons_safari_only() {
        let rule = mouse_buttons_rule(true, "button4", "button5");
        assert_eq!(rule.manipulators[0].from.pointing_button.as_deref(), Some("button4"));
        assert_eq!(rule.manipulators[1].from.pointing_button.as_deref(), Some("button5"));
        for manipulator in &rule.manipulators {
            assert_eq!(
                manipulator.conditions,
                vec![Condition::FrontmostApplicationIf {
                    bundle_identifiers: vec!["^com\\.apple\\.Safari$".to_string()]
                }]
            );
        }
    }

    #[test]
    fn test_mouse_buttons_everywhere() {
        let rule = mouse_buttons_rule(false, "button3", "button6");
        assert!(rule.manipulators.iter().all(|m| m.conditions.is_empty()));
        let value = serde_json::to_value(&rule).unwrap();
        assert!(value["manipulators"][0].get("conditions").is_none());
    }
}

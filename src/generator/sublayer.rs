//! Hyper sublayer state machine.
//!
//! The target engine has no notion of nested modes, so each sublayer is encoded
//! with one flag variable (`hyper_sublayer_<key>`) and two kinds of manipulators:
//!
//! - a toggle on the trigger key, guarded by `hyper == 1` and by every *other*
//!   sublayer flag being `0`, which raises the flag on press and clears it on
//!   release;
//! - one leaf per binding, guarded by the sublayer's own flag being `1`, which
//!   dispatches the binding's action.
//!
//! Requiring all other flags to be clear before raising one keeps at most one
//! sublayer active at a time. The engine evaluates guards per event, in order,
//! so no runtime locking is involved. Exclusion is only checked when a toggle
//! fires: releasing sublayer A and then pressing B while hyper is still held is
//! a legal sequence.

use crate::generator::hyper::hyper_flag;
use crate::models::{Condition, FlagVariable, FromEvent, LayerConfig, Manipulator, Rule};
use tracing::debug;

/// Builds one rule per sublayer, in declaration order.
#[must_use]
pub fn sublayer_rules(layers: &[LayerConfig]) -> Vec<Rule> {
    let flags: Vec<FlagVariable> = layers
        .iter()
        .map(|layer| FlagVariable::sublayer(&layer.key))
        .collect();

    layers
        .iter()
        .zip(&flags)
        .map(|(layer, flag)| sublayer_rule(layer, flag, &flags))
        .collect()
}

/// Builds the rule for a single sublayer.
///
/// `all_flags` holds the flags of every sublayer in the configuration,
/// including this one.
fn sublayer_rule(layer: &LayerConfig, flag: &FlagVariable, all_flags: &[FlagVariable]) -> Rule {
    let mut manipulators = Vec::with_capacity(layer.sub.len() + 1);
    manipulators.push(toggle_manipulator(&layer.key, flag, all_flags));

    for (leaf, value) in &layer.sub {
        let action = layer.kind.action(value.clone());
        debug!(layer = %layer.key, %leaf, %action, "sublayer leaf");

        manipulators.push(
            Manipulator::basic(FromEvent::key(leaf.clone()))
                .with_description(format!("Hyper+{}+{} → {}", layer.key, leaf, action))
                .to(action.to_event())
                .when(flag.is(1)),
        );
    }

    Rule::new(format!("Hyper Key sublayer \"{}\"", layer.key), manipulators)
}

fn toggle_manipulator(key: &str, flag: &FlagVariable, all_flags: &[FlagVariable]) -> Manipulator {
    Manipulator::basic(FromEvent::key(key))
        .with_description(format!("Toggle Hyper sublayer {key}"))
        .to(flag.set(1))
        .to_after_key_up(flag.set(0))
        .with_conditions(toggle_conditions(flag, all_flags))
}

/// `hyper == 1` followed by `other == 0` for every other sublayer flag.
///
/// The own flag is never part of the guard. Duplicate trigger keys share a
/// flag, so each other flag appears at most once.
fn toggle_conditions(flag: &FlagVariable, all_flags: &[FlagVariable]) -> Vec<Condition> {
    let mut conditions = vec![hyper_flag().is(1)];
    let mut seen: Vec<&FlagVariable> = Vec::new();

    for other in all_flags {
        if other == flag || seen.contains(&other) {
            continue;
        }
        seen.push(other);
        conditions.push(other.is(0));
    }

    conditions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActionKind, ToEvent};

    fn variable_guards(manipulator: &Manipulator) -> Vec<(String, u8)> {
        manipulator
            .conditions
            .iter()
            .filter_map(Condition::variable)
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    #[test]
    fn test_single_layer() {
        let layers = vec![LayerConfig::new("o", ActionKind::App).bind("s", "/Applications/Safari.app")];
        let rules = sublayer_rules(&layers);

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].description, "Hyper Key sublayer \"o\"");
        assert_eq!(rules[0].manipulators.len(), 2);

        let toggle = &rules[0].manipulators[0];
        assert_eq!(toggle.from.key_code.as_deref(), Some("o"));
        assert_eq!(variable_guards(toggle), vec![("hyper".to_string(), 1)]);
        assert_eq!(toggle.to, vec![FlagVariable::sublayer("o").set(1)]);
        assert_eq!(toggle.to_after_key_up, vec![FlagVariable::sublayer("o").set(0)]);

        let leaf = &rules[0].manipulators[1];
        assert_eq!(leaf.from.key_code.as_deref(), Some("s"));
        assert_eq!(
            variable_guards(leaf),
            vec![("hyper_sublayer_o".to_string(), 1)]
        );
        assert_eq!(leaf.to, vec![ToEvent::open_application("/Applications/Safari.app")]);
    }

    #[test]
    fn test_toggles_exclude_each_other() {
        let layers = vec![
            LayerConfig::new("o", ActionKind::App).bind("s", "/Applications/Safari.app"),
            LayerConfig::new("w", ActionKind::Web).bind("g", "https://github.com"),
            LayerConfig::new("r", ActionKind::Shell).bind("d", "say done"),
        ];
        let rules = sublayer_rules(&layers);

        let w_guards = variable_guards(&rules[1].manipulators[0]);
        assert_eq!(
            w_guards,
            vec![
                ("hyper".to_string(), 1),
                ("hyper_sublayer_o".to_string(), 0),
                ("hyper_sublayer_r".to_string(), 0),
            ]
        );

        for (rule, layer) in rules.iter().zip(&layers) {
            let own = FlagVariable::sublayer(&layer.key).to_string();
            let toggle_guards = variable_guards(&rule.manipulators[0]);
            assert_eq!(toggle_guards.len(), layers.len());
            assert!(toggle_guards.iter().all(|(name, _)| *name != own));

            for leaf in &rule.manipulators[1..] {
                assert_eq!(variable_guards(leaf), vec![(own.clone(), 1)]);
            }
        }
    }

    #[test]
    fn test_web_leaf_runs_open() {
        let layers = vec![LayerConfig::new("w", ActionKind::Web).bind("g", "https://github.com")];
        let rules = sublayer_rules(&layers);
        assert_eq!(
            rules[0].manipulators[1].to,
            vec![ToEvent::shell("open https://github.com")]
        );
    }

    #[test]
    fn test_duplicate_trigger_keys_share_flag() {
        let layers = vec![
            LayerConfig::new("o", ActionKind::App),
            LayerConfig::new("o", ActionKind::Web),
            LayerConfig::new("w", ActionKind::Web),
        ];
        let rules = sublayer_rules(&layers);
        assert_eq!(
            variable_guards(&rules[2].manipulators[0]),
            vec![("hyper".to_string(), 1), ("hyper_sublayer_o".to_string(), 0)]
        );
    }

    #[test]
    fn test_empty_layer_has_only_toggle() {
        let rules = sublayer_rules(&[LayerConfig::new("x", ActionKind::App)]);
        assert_eq!(rules[0].manipulators.len(), 1);
    }

    #[test]
    fn test_no_layers() {
        assert!(sublayer_rules(&[]).is_empty());
    }
}

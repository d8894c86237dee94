//! Rule compiler: remapping configuration in, ordered rule list out.
//!
//! Feature inclusion is decided by the configuration alone and rules are
//! concatenated in a fixed order:
//!
//! 1. HHKB mode and/or hyper key
//! 2. Disable left control
//! 3. Disable command + tab
//! 4. Switch tabs with command + option + H/L
//! 5. Mouse side buttons
//! 6. Tmux session jump
//! 7. Option bindings (ordered by key)
//! 8. Option arrows (always)
//! 9. Hyper sublayers (declaration order)
//!
//! The engine evaluates rules top to bottom and the first matching manipulator
//! wins, so this order is also the precedence order between features.

use crate::generator::hyper::{hhkb_mode_rule, hyper_key_rule, HHKB_SOURCE_KEY};
use crate::generator::option::option_binding_rules;
use crate::generator::sublayer::sublayer_rules;
use crate::generator::tmux::{tmux_jump_rule, TmuxEnvironment};
use crate::generator::utility::{
    disable_command_tab_rule, disable_left_ctrl_rule, mouse_buttons_rule, option_arrows_rule,
    switch_tabs_rule,
};
use crate::generator::validator::{ConfigValidator, ValidationReport};
use crate::models::{ConflictPolicy, RemapConfig, Rule, SimpleModification};
use anyhow::Result;
use serde::Serialize;
use tracing::{debug, warn};

/// Output of one compilation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledLayout {
    /// Complex modification rules, in evaluation order
    pub rules: Vec<Rule>,
    /// Profile-level simple modifications
    pub simple_modifications: Vec<SimpleModification>,
}

impl CompiledLayout {
    /// Total number of manipulators across all rules.
    #[must_use]
    pub fn manipulator_count(&self) -> usize {
        self.rules.iter().map(|rule| rule.manipulators.len()).sum()
    }

    /// Finds a rule by its description.
    #[must_use]
    pub fn rule(&self, description: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.description == description)
    }
}

/// Compiles a [`RemapConfig`] into a [`CompiledLayout`].
pub struct RuleCompiler<'a> {
    config: &'a RemapConfig,
    tmux_env: Option<&'a TmuxEnvironment>,
}

impl<'a> RuleCompiler<'a> {
    /// Creates a compiler for `config`.
    #[must_use]
    pub const fn new(config: &'a RemapConfig) -> Self {
        Self {
            config,
            tmux_env: None,
        }
    }

    /// Supplies the host values needed by the tmux jump rule.
    #[must_use]
    pub fn with_tmux_environment(mut self, env: &'a TmuxEnvironment) -> Self {
        self.tmux_env = Some(env);
        self
    }

    /// Runs conflict detection under the configured policy.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        ConfigValidator::new(self.config).validate()
    }

    /// Compiles the configuration.
    ///
    /// Fails when the conflict policy is `reject` and a conflict exists, or
    /// when the tmux rule is enabled without a [`TmuxEnvironment`].
    pub fn compile(&self) -> Result<CompiledLayout> {
        let report = self.validate();
        if !report.is_valid() {
            anyhow::bail!("Key conflicts found:\n{}", report.format_message());
        }
        for conflict in &report.warnings {
            warn!(key = %conflict.key, kind = %conflict.kind, "{}", conflict.message);
        }

        let config = self.config;
        let mut rules = Vec::new();

        self.push_modifier_rules(&mut rules);

        let toggles: [(bool, fn() -> Rule); 3] = [
            (config.disable_left_ctrl, disable_left_ctrl_rule),
            (config.disable_command_tab, disable_command_tab_rule),
            (config.switch_safari_tabs_hl, switch_tabs_rule),
        ];
        rules.extend(
            toggles
                .iter()
                .filter(|(enabled, _)| *enabled)
                .map(|(_, build)| build()),
        );

        let mouse = &config.fix_g502;
        if mouse.enable {
            rules.push(mouse_buttons_rule(
                mouse.safari_only,
                &mouse.back_button,
                &mouse.forward_button,
            ));
        }

        if config.tmux_jump.enable {
            let env = self.tmux_env.ok_or_else(|| {
                anyhow::anyhow!("tmux_jump is enabled but no tmux environment was provided")
            })?;
            rules.push(tmux_jump_rule(&config.tmux_jump, env));
        }

        rules.extend(option_binding_rules(&config.keybindings.option));
        rules.push(option_arrows_rule());
        rules.extend(sublayer_rules(&config.keybindings.layers));

        let mut simple_modifications = Vec::new();
        if config.fix_c_c {
            simple_modifications.push(SimpleModification::new(
                "grave_accent_and_tilde",
                "non_us_backslash",
            ));
        }

        let layout = CompiledLayout {
            rules,
            simple_modifications,
        };
        debug!(
            rules = layout.rules.len(),
            manipulators = layout.manipulator_count(),
            "compiled layout"
        );

        Ok(layout)
    }

    /// HHKB mode and hyper key.
    ///
    /// When both claim caps lock the policy decides: `precedence` keeps only
    /// the HHKB rule, `allow_both` keeps both with HHKB first.
    fn push_modifier_rules(&self, rules: &mut Vec<Rule>) {
        let config = self.config;
        if !config.use_hhkb {
            rules.push(hyper_key_rule(&config.hyperkey));
            return;
        }

        rules.push(hhkb_mode_rule());

        let same_key = config.hyperkey == HHKB_SOURCE_KEY;
        if !same_key || config.key_conflict == ConflictPolicy::AllowBoth {
            rules.push(hyper_key_rule(&config.hyperkey));
        } else {
            debug!(key = HHKB_SOURCE_KEY, "hyper key rule skipped in favour of HHKB mode");
        }
    }
}

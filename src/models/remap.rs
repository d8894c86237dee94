//! Typed remapping configuration.
//!
//! This is the plain data the rule compiler consumes. It can be populated from
//! YAML (see [`crate::parser::remap`]) or built directly in code; every
//! optional field has a documented default.

use crate::constants::{DEFAULT_HYPER_KEY, SUPPORTED_CONFIG_VERSION};
use crate::models::action::{ActionDescriptor, ActionKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How the compiler treats two features that claim the same physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Deterministic precedence: the alternate modifier mapping wins over the
    /// hyper key, everything else is decided by rule order. Conflicts are
    /// reported as warnings.
    #[default]
    Precedence,
    /// Emit every rule, even when one shadows another. Conflicts are reported
    /// as warnings.
    AllowBoth,
    /// Refuse to compile when any conflict is detected.
    Reject,
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Precedence => write!(f, "precedence"),
            Self::AllowBoth => write!(f, "allow_both"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Terminal application used by the tmux jump rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Terminal {
    /// Alacritty
    #[default]
    Alacritty,
    /// Ghostty
    Ghostty,
    /// iTerm2
    Iterm2,
    /// Terminal.app
    Terminal,
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alacritty => write!(f, "alacritty"),
            Self::Ghostty => write!(f, "ghostty"),
            Self::Iterm2 => write!(f, "iterm2"),
            Self::Terminal => write!(f, "terminal"),
        }
    }
}

/// A key bound to an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Dispatch kind
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// Application path, URL or shell command
    #[serde(alias = "value")]
    pub val: String,
}

impl KeyBinding {
    /// Creates a binding.
    pub fn new(kind: ActionKind, val: impl Into<String>) -> Self {
        Self {
            kind,
            val: val.into(),
        }
    }

    /// Builds the action this binding fires.
    #[must_use]
    pub fn action(&self) -> ActionDescriptor {
        self.kind.action(self.val.clone())
    }
}

/// A hyper sublayer: hold hyper, hold `key`, press a leaf key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Trigger key entering the sublayer
    pub key: String,
    /// Dispatch kind shared by every leaf
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// Leaf key -> application path, URL or command
    #[serde(default)]
    pub sub: BTreeMap<String, String>,
}

impl LayerConfig {
    /// Creates an empty sublayer.
    pub fn new(key: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            key: key.into(),
            kind,
            sub: BTreeMap::new(),
        }
    }

    /// Adds a leaf binding.
    pub fn bind(mut self, leaf: impl Into<String>, value: impl Into<String>) -> Self {
        self.sub.insert(leaf.into(), value.into());
        self
    }
}

/// Option-modifier bindings and hyper sublayers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KeybindingsConfig {
    /// Left Option + key bindings
    #[serde(default)]
    pub option: BTreeMap<String, KeyBinding>,
    /// Sublayers, in declaration order
    #[serde(default)]
    pub layers: Vec<LayerConfig>,
}

/// Mouse side-button remapping (back/forward).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseButtonsConfig {
    /// Emit the rule
    #[serde(default)]
    pub enable: bool,
    /// Only fire while Safari is frontmost
    #[serde(default = "default_true")]
    pub safari_only: bool,
    /// Button mapped to "back"
    #[serde(default = "default_back_button")]
    pub back_button: String,
    /// Button mapped to "forward"
    #[serde(default = "default_forward_button")]
    pub forward_button: String,
}

impl Default for MouseButtonsConfig {
    fn default() -> Self {
        Self {
            enable: false,
            safari_only: true,
            back_button: default_back_button(),
            forward_button: default_forward_button(),
        }
    }
}

/// Tmux session jumping with modifier + digit/letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmuxJumpConfig {
    /// Emit the rule
    #[serde(default)]
    pub enable: bool,
    /// Modifiers held together with the digit or letter
    #[serde(default = "default_tmux_modifiers")]
    pub modifiers: Vec<String>,
    /// Jumplist file (`key:session[:directory]` per line)
    #[serde(default = "default_jumplist_path")]
    pub jumplist_path: String,
    /// Letters that jump to sessions
    #[serde(default)]
    pub letters: Vec<String>,
    /// Bind every letter a-z
    #[serde(default)]
    pub all_letters: bool,
    /// Bind every letter a-z except these (wins over `all_letters`)
    #[serde(default)]
    pub all_letters_except: Option<Vec<String>>,
    /// Terminal hosting tmux
    #[serde(default)]
    pub terminal: Terminal,
    /// tmux binary
    #[serde(default = "default_tmux_path")]
    pub tmux_path: String,
}

impl Default for TmuxJumpConfig {
    fn default() -> Self {
        Self {
            enable: false,
            modifiers: default_tmux_modifiers(),
            jumplist_path: default_jumplist_path(),
            letters: Vec::new(),
            all_letters: false,
            all_letters_except: None,
            terminal: Terminal::default(),
            tmux_path: default_tmux_path(),
        }
    }
}

impl TmuxJumpConfig {
    /// Letters bound to sessions after applying `all_letters_except` and
    /// `all_letters`.
    #[must_use]
    pub fn resolved_letters(&self) -> Vec<String> {
        if let Some(except) = &self.all_letters_except {
            ('a'..='z')
                .filter(|c| !except.iter().any(|e| e.starts_with(*c)))
                .map(String::from)
                .collect()
        } else if self.all_letters {
            ('a'..='z').map(String::from).collect()
        } else {
            self.letters.clone()
        }
    }
}

/// Complete remapping configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemapConfig {
    /// File format version
    #[serde(default = "default_version")]
    pub version: u32,
    /// Key acting as hyper (hold) / escape (tap)
    #[serde(default = "default_hyper_key")]
    pub hyperkey: String,
    /// Map caps lock to left control
    #[serde(default)]
    pub use_hhkb: bool,
    /// Swallow left control
    #[serde(default)]
    pub disable_left_ctrl: bool,
    /// Swallow command + tab
    #[serde(default)]
    pub disable_command_tab: bool,
    /// Command + Option + H/L switch tabs
    #[serde(default)]
    pub switch_safari_tabs_hl: bool,
    /// Swap the grave key for the ISO section key
    #[serde(default)]
    pub fix_c_c: bool,
    /// Mouse side buttons
    #[serde(default)]
    pub fix_g502: MouseButtonsConfig,
    /// Tmux session jumping
    #[serde(default)]
    pub tmux_jump: TmuxJumpConfig,
    /// Option bindings and sublayers
    #[serde(default, alias = "keybingings")]
    pub keybindings: KeybindingsConfig,
    /// Handling of features claiming the same key
    #[serde(default)]
    pub key_conflict: ConflictPolicy,
}

impl Default for RemapConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            hyperkey: default_hyper_key(),
            use_hhkb: false,
            disable_left_ctrl: false,
            disable_command_tab: false,
            switch_safari_tabs_hl: false,
            fix_c_c: false,
            fix_g502: MouseButtonsConfig::default(),
            tmux_jump: TmuxJumpConfig::default(),
            keybindings: KeybindingsConfig::default(),
            key_conflict: ConflictPolicy::default(),
        }
    }
}

impl RemapConfig {
    /// Creates a default configuration using `hyperkey`.
    pub fn with_hyperkey(hyperkey: impl Into<String>) -> Self {
        Self {
            hyperkey: hyperkey.into(),
            ..Self::default()
        }
    }

    /// Appends a sublayer.
    #[must_use]
    pub fn layer(mut self, layer: LayerConfig) -> Self {
        self.keybindings.layers.push(layer);
        self
    }

    /// Adds an option binding.
    pub fn option(mut self, key: impl Into<String>, binding: KeyBinding) -> Self {
        self.keybindings.option.insert(key.into(), binding);
        self
    }
}

const fn default_version() -> u32 {
    SUPPORTED_CONFIG_VERSION
}

fn default_hyper_key() -> String {
    DEFAULT_HYPER_KEY.to_string()
}

const fn default_true() -> bool {
    true
}

fn default_back_button() -> String {
    "button4".to_string()
}

fn default_forward_button() -> String {
    "button5".to_string()
}

fn default_tmux_modifiers() -> Vec<String> {
    vec!["option".to_string(), "control".to_string()]
}

fn default_jumplist_path() -> String {
    "~/.tmuxjumplist".to_string()
}

fn default_tmux_path() -> String {
    "/opt/homebrew/bin/tmux".to_string()
}

//! Target-engine rule schema.
//!
//! These types serialize to the exact JSON shape Karabiner-Elements expects
//! under `profiles[].complex_modifications.rules`. Field names and nesting are
//! part of the contract; optional fields are omitted rather than emitted empty.

use crate::constants::{MANIPULATOR_TYPE_BASIC, SUBLAYER_VARIABLE_PREFIX};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of an engine-managed boolean variable.
///
/// The compiler only ever emits the name together with read (`variable_if`)
/// and write (`set_variable`) declarations. Values live in the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagVariable(String);

impl FlagVariable {
    /// Creates a flag variable with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Flag variable owned by the sublayer triggered by `key`.
    ///
    /// Derived only from the trigger key so recompiling yields the same name.
    #[must_use]
    pub fn sublayer(key: &str) -> Self {
        Self(format!("{SUBLAYER_VARIABLE_PREFIX}{key}"))
    }

    /// Returns the variable name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `set_variable` effect writing `value` to this flag.
    #[must_use]
    pub fn set(&self, value: u8) -> ToEvent {
        ToEvent {
            set_variable: Some(SetVariable {
                name: self.clone(),
                value,
            }),
            ..ToEvent::default()
        }
    }

    /// Guard requiring this flag to equal `value`.
    #[must_use]
    pub fn is(&self, value: u8) -> Condition {
        Condition::VariableIf {
            name: self.clone(),
            value,
        }
    }
}

impl fmt::Display for FlagVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A labelled, ordered group of manipulators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Label shown in the Karabiner-Elements UI
    pub description: String,
    /// Manipulators, evaluated in order by the engine
    pub manipulators: Vec<Manipulator>,
}

impl Rule {
    /// Creates a rule from a label and its manipulators.
    pub fn new(description: impl Into<String>, manipulators: Vec<Manipulator>) -> Self {
        Self {
            description: description.into(),
            manipulators,
        }
    }
}

/// A single event-trigger-to-effect binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manipulator {
    /// Manipulator type tag (always `basic` here)
    #[serde(rename = "type")]
    pub kind: String,
    /// Optional human-readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Trigger
    pub from: FromEvent,
    /// Effects on press
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<ToEvent>,
    /// Effects when the trigger was pressed and released alone
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_if_alone: Vec<ToEvent>,
    /// Effects on release
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_after_key_up: Vec<ToEvent>,
    /// Guards, all of which must hold
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl Manipulator {
    /// Creates a basic manipulator for `from` with no effects or guards.
    pub fn basic(from: FromEvent) -> Self {
        Self {
            kind: MANIPULATOR_TYPE_BASIC.to_string(),
            description: None,
            from,
            to: Vec::new(),
            to_if_alone: Vec::new(),
            to_after_key_up: Vec::new(),
            conditions: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a press effect.
    pub fn to(mut self, event: ToEvent) -> Self {
        self.to.push(event);
        self
    }

    /// Appends a tapped-alone effect.
    pub fn to_if_alone(mut self, event: ToEvent) -> Self {
        self.to_if_alone.push(event);
        self
    }

    /// Appends a release effect.
    pub fn to_after_key_up(mut self, event: ToEvent) -> Self {
        self.to_after_key_up.push(event);
        self
    }

    /// Appends a guard.
    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Replaces the guard list.
    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }
}

/// Trigger description: a key code or a pointing-device button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromEvent {
    /// Keyboard key code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_code: Option<String>,
    /// Pointing-device button (e.g. `button4`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointing_button: Option<String>,
    /// Modifier requirements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Modifiers>,
}

impl FromEvent {
    /// Trigger on a bare key.
    pub fn key(key_code: impl Into<String>) -> Self {
        Self {
            key_code: Some(key_code.into()),
            ..Self::default()
        }
    }

    /// Trigger on a pointing-device button.
    pub fn button(button: impl Into<String>) -> Self {
        Self {
            pointing_button: Some(button.into()),
            ..Self::default()
        }
    }

    /// Requires the given modifiers to be held.
    pub fn mandatory<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mods = self.modifiers.get_or_insert_with(Modifiers::default);
        mods.mandatory.extend(modifiers.into_iter().map(Into::into));
        self
    }

    /// Allows the given modifiers to be held without blocking the match.
    pub fn optional<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mods = self.modifiers.get_or_insert_with(Modifiers::default);
        mods.optional.extend(modifiers.into_iter().map(Into::into));
        self
    }
}

/// Mandatory and optional modifier sets of a trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Modifiers that must be held
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mandatory: Vec<String>,
    /// Modifiers that may be held
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<String>,
}

/// One effect of a manipulator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToEvent {
    /// Key to emit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_code: Option<String>,
    /// Modifiers to emit together with `key_code`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
    /// Shell command to run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell_command: Option<String>,
    /// Variable write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_variable: Option<SetVariable>,
    /// Built-in engine function
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_function: Option<SoftwareFunction>,
}

impl ToEvent {
    /// Emits a key.
    pub fn key(key_code: impl Into<String>) -> Self {
        Self {
            key_code: Some(key_code.into()),
            ..Self::default()
        }
    }

    /// Emits a key with modifiers.
    pub fn key_with<I, S>(key_code: impl Into<String>, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key_code: Some(key_code.into()),
            modifiers: modifiers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Runs a shell command.
    pub fn shell(command: impl Into<String>) -> Self {
        Self {
            shell_command: Some(command.into()),
            ..Self::default()
        }
    }

    /// Launches the application bundle at `file_path`.
    pub fn open_application(file_path: impl Into<String>) -> Self {
        Self {
            software_function: Some(SoftwareFunction {
                open_application: Some(OpenApplication {
                    file_path: file_path.into(),
                }),
            }),
            ..Self::default()
        }
    }
}

/// `set_variable` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetVariable {
    /// Variable name
    pub name: FlagVariable,
    /// Value written (0 or 1)
    pub value: u8,
}

/// `software_function` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareFunction {
    /// Application launch request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_application: Option<OpenApplication>,
}

/// `open_application` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenApplication {
    /// Path of the application bundle
    pub file_path: String,
}

/// Guard evaluated by the engine before a manipulator fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Flag variable equals `value`
    VariableIf {
        /// Variable checked
        name: FlagVariable,
        /// Expected value
        value: u8,
    },
    /// Frontmost application matches one of the bundle identifier patterns
    FrontmostApplicationIf {
        /// Regex patterns over bundle identifiers
        bundle_identifiers: Vec<String>,
    },
}

impl Condition {
    /// Returns the flag variable this guard reads, if any.
    #[must_use]
    pub fn variable(&self) -> Option<(&FlagVariable, u8)> {
        match self {
            Self::VariableIf { name, value } => Some((name, *value)),
            Self::FrontmostApplicationIf { .. } => None,
        }
    }
}

/// `{"key_code": ...}` object used by simple modifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCode {
    /// Key code
    pub key_code: String,
}

/// Profile-level one-to-one key replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleModification {
    /// Physical key
    pub from: KeyCode,
    /// Replacement keys
    pub to: Vec<KeyCode>,
}

impl SimpleModification {
    /// Replaces `from` with `to`.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: KeyCode {
                key_code: from.into(),
            },
            to: vec![KeyCode {
                key_code: to.into(),
            }],
        }
    }
}

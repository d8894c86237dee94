//! Terminal actions fired by leaf bindings.

use crate::constants::OPEN_COMMAND;
use crate::models::rule::ToEvent;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a binding value is dispatched.
///
/// Closed set: a binding with any other `type` fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Value is an application bundle path
    #[serde(alias = "application")]
    App,
    /// Value is a URL handed to `open`
    #[serde(alias = "url")]
    Web,
    /// Value is a raw shell command
    Shell,
}

impl ActionKind {
    /// Builds the action for `value` under this dispatch kind.
    pub fn action(self, value: impl Into<String>) -> ActionDescriptor {
        let value = value.into();
        match self {
            Self::App => ActionDescriptor::LaunchApp { path: value },
            Self::Web => ActionDescriptor::OpenUrl { url: value },
            Self::Shell => ActionDescriptor::RunShell { command: value },
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::App => write!(f, "app"),
            Self::Web => write!(f, "web"),
            Self::Shell => write!(f, "shell"),
        }
    }
}

/// Leaf-level instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionDescriptor {
    /// Launch the application at `path`
    LaunchApp {
        /// Application bundle path
        path: String,
    },
    /// Open `url` with the platform opener
    OpenUrl {
        /// URL or other resource
        url: String,
    },
    /// Run `command` through the shell
    RunShell {
        /// Shell command line
        command: String,
    },
}

impl ActionDescriptor {
    /// Converts the action into the effect the engine executes.
    #[must_use]
    pub fn to_event(&self) -> ToEvent {
        match self {
            Self::LaunchApp { path } => ToEvent::open_application(path.clone()),
            Self::OpenUrl { url } => ToEvent::shell(format!("{OPEN_COMMAND} {url}")),
            Self::RunShell { command } => ToEvent::shell(command.clone()),
        }
    }
}

impl fmt::Display for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LaunchApp { path } => write!(f, "launch {path}"),
            Self::OpenUrl { url } => write!(f, "open {url}"),
            Self::RunShell { command } => write!(f, "run {command}"),
        }
    }
}

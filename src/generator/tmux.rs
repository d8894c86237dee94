//! Tmux session jump rule.
//!
//! Modifier + `1`..`9` (and optional letters) run the session switch helper
//! for that key; modifier + `0` opens the jumplist in an editor. The helper
//! reads the jumplist itself, this module only emits the shell commands.

use crate::models::{FromEvent, Manipulator, Rule, Terminal, TmuxJumpConfig, ToEvent};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Editor used when `$EDITOR` is unset.
const DEFAULT_EDITOR: &str = "nvim";

/// Directories searched for the editor after `$PATH`.
const EDITOR_FALLBACK_DIRS: [&str; 3] = ["/opt/homebrew/bin", "/usr/local/bin", "/usr/bin"];

/// Host-dependent values baked into the tmux commands.
///
/// Resolved once by the caller so that rule building stays a pure function of
/// its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmuxEnvironment {
    /// Command prefix of the session switch helper (e.g. `/usr/local/bin/karabingen tmux switch`)
    pub switcher: String,
    /// Editor executable used for the jumplist
    pub editor: String,
    /// Home directory used for `~/` expansion
    pub home: Option<PathBuf>,
}

impl TmuxEnvironment {
    /// Detects the environment of the running process.
    pub fn detect() -> Result<Self> {
        let exe = std::env::current_exe().context("Failed to get executable path")?;
        let exe = std::fs::canonicalize(&exe).unwrap_or(exe);

        let editor_name = std::env::var("EDITOR")
            .ok()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string());

        Ok(Self {
            switcher: format!("{} tmux switch", exe.display()),
            editor: resolve_executable(&editor_name),
            home: dirs::home_dir(),
        })
    }

    /// Expands a leading `~/` against the home directory.
    #[must_use]
    pub fn expand_home(&self, path: &str) -> String {
        match (path.strip_prefix("~/"), &self.home) {
            (Some(rest), Some(home)) => home.join(rest).display().to_string(),
            _ => path.to_string(),
        }
    }
}

/// Finds `name` on `$PATH` or in the usual install locations.
///
/// Falls back to `name` unchanged so the shell can still try to resolve it.
fn resolve_executable(name: &str) -> String {
    if Path::new(name).is_absolute() {
        return name.to_string();
    }

    let path_dirs = std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).collect::<Vec<_>>())
        .unwrap_or_default();

    path_dirs
        .into_iter()
        .chain(EDITOR_FALLBACK_DIRS.into_iter().map(PathBuf::from))
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
        .map_or_else(|| name.to_string(), |found| found.display().to_string())
}

/// Command that opens `file` in `editor` inside `terminal`.
fn edit_command(terminal: Terminal, editor: &str, file: &str) -> String {
    match terminal {
        Terminal::Alacritty => format!("open -a Alacritty -n --args -e {editor} {file}"),
        Terminal::Ghostty => format!("open -a Ghostty -n --args -e {editor} {file}"),
        Terminal::Iterm2 => format!(
            "osascript -e 'tell application \"iTerm\" to create window with default profile command \"{editor} {file}\"'"
        ),
        Terminal::Terminal => format!(
            "osascript -e 'tell application \"Terminal\" to do script \"{editor} {file}\"'"
        ),
    }
}

/// `["option", "control"]` -> `Option+Control`
fn modifier_label(modifiers: &[String]) -> String {
    modifiers
        .iter()
        .map(|m| {
            let mut chars = m.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join("+")
}

/// Builds the tmux jump rule.
#[must_use]
pub fn tmux_jump_rule(config: &TmuxJumpConfig, env: &TmuxEnvironment) -> Rule {
    let mod_label = modifier_label(&config.modifiers);
    let base_command = format!(
        "{} --tmux {} --jumplist {} --terminal {}",
        env.switcher, config.tmux_path, config.jumplist_path, config.terminal
    );

    let jumplist = env.expand_home(&config.jumplist_path);
    let mut manipulators = vec![Manipulator::basic(
        FromEvent::key("0").mandatory(config.modifiers.iter().cloned()),
    )
    .with_description(format!("{mod_label}+0 → edit tmuxjumplist"))
    .to(ToEvent::shell(edit_command(config.terminal, &env.editor, &jumplist)))];

    let digits = (1..=9).map(|d| d.to_string());
    for key in digits.chain(config.resolved_letters()) {
        manipulators.push(
            Manipulator::basic(FromEvent::key(key.clone()).mandatory(config.modifiers.iter().cloned()))
                .with_description(format!("{mod_label}+{key} → tmux session {key}"))
                .to(ToEvent::shell(format!("{base_command} {key}"))),
        );
    }

    debug!(count = manipulators.len(), terminal = %config.terminal, "tmux jump rule");

    Rule::new(
        format!("{mod_label}+Key → tmux session jump ({})", config.terminal),
        manipulators,
    )
}

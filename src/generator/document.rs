//! karabiner.json assembly.
//!
//! The compiled layout owns exactly three things in the target profile:
//! `complex_modifications.rules`, `simple_modifications` and
//! `virtual_hid_keyboard.keyboard_type_v2`. Everything else in the existing
//! document (other profiles, `devices`, `global`, unknown keys) is kept as-is,
//! which is why the document is handled as untyped JSON here.

use crate::constants::{DEFAULT_KEYBOARD_TYPE, DEFAULT_PROFILE_NAME};
use crate::generator::compiler::CompiledLayout;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where and how the compiled layout lands in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Profile receiving the rules (created if missing)
    pub profile_name: String,
    /// `virtual_hid_keyboard.keyboard_type_v2`
    pub keyboard_type: String,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            profile_name: DEFAULT_PROFILE_NAME.to_string(),
            keyboard_type: DEFAULT_KEYBOARD_TYPE.to_string(),
        }
    }
}

/// Result of writing the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// File written
    pub path: PathBuf,
    /// Backup of the previous file, if one was made
    pub backup: Option<PathBuf>,
}

/// Default karabiner.json location: `~/.config/karabiner/karabiner.json`.
pub fn default_document_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Failed to get home directory")?;
    Ok(home.join(".config").join("karabiner").join("karabiner.json"))
}

/// Folds `layout` into `existing`, returning the new document.
///
/// A missing or non-object `existing` starts a fresh document.
#[must_use]
pub fn merge_layout(existing: Option<Value>, layout: &CompiledLayout, options: &DocumentOptions) -> Value {
    let mut root = match existing {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };

    root.entry("global")
        .or_insert_with(|| json!({ "show_profile_name_in_menu_bar": true }));

    ensure(&mut root, "profiles", Value::is_array, || Value::Array(Vec::new()));
    if let Some(profiles) = root.get_mut("profiles").and_then(Value::as_array_mut) {
        merge_profiles(profiles, layout, options);
    }

    Value::Object(root)
}

fn merge_profiles(profiles: &mut Vec<Value>, layout: &CompiledLayout, options: &DocumentOptions) {
    let target = profiles.iter().position(|profile| {
        profile.get("name").and_then(Value::as_str) == Some(options.profile_name.as_str())
    });

    // Duplicate names are possible; only the first match is updated.
    for (idx, profile) in profiles.iter_mut().enumerate() {
        if Some(idx) == target {
            continue;
        }
        if let Value::Object(profile) = profile {
            if profile.contains_key("selected") {
                profile.insert("selected".to_string(), Value::Bool(false));
            }
        }
    }

    let idx = target.unwrap_or_else(|| {
        debug!(profile = %options.profile_name, "creating profile");
        profiles.push(json!({ "name": options.profile_name }));
        profiles.len() - 1
    });

    if let Value::Object(profile) = &mut profiles[idx] {
        apply_layout(profile, layout, options);
    }
}

fn apply_layout(profile: &mut Map<String, Value>, layout: &CompiledLayout, options: &DocumentOptions) {
    profile.insert("selected".to_string(), Value::Bool(true));

    ensure(profile, "virtual_hid_keyboard", Value::is_object, || Value::Object(Map::new()));
    if let Some(keyboard) = profile
        .get_mut("virtual_hid_keyboard")
        .and_then(Value::as_object_mut)
    {
        keyboard.insert(
            "keyboard_type_v2".to_string(),
            Value::String(options.keyboard_type.clone()),
        );
    }

    profile.insert(
        "simple_modifications".to_string(),
        json!(layout.simple_modifications),
    );

    ensure(profile, "complex_modifications", Value::is_object, || Value::Object(Map::new()));
    if let Some(complex) = profile
        .get_mut("complex_modifications")
        .and_then(Value::as_object_mut)
    {
        complex.insert("rules".to_string(), json!(layout.rules));
    }
}

/// Replaces `map[key]` with `default()` unless it already passes `check`.
fn ensure(
    map: &mut Map<String, Value>,
    key: &str,
    check: fn(&Value) -> bool,
    default: impl FnOnce() -> Value,
) {
    if !map.get(key).is_some_and(check) {
        map.insert(key.to_string(), default());
    }
}

/// Loads the existing document, if any.
///
/// A file that cannot be parsed is ignored with a warning so a broken
/// karabiner.json can be regenerated.
pub fn load_document(path: &Path) -> Result<Option<Value>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read existing file: {}", path.display()))?;

    match serde_json::from_str(&content) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unparseable karabiner.json");
            Ok(None)
        }
    }
}

/// Copies `path` to `backup_<YYYYMMDD_HHMMSS>.json` in the same directory.
pub fn backup_document(path: &Path, now: DateTime<Local>) -> Result<PathBuf> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let backup_path = dir.join(format!("backup_{}.json", now.format("%Y%m%d_%H%M%S")));

    fs::copy(path, &backup_path)
        .with_context(|| format!("Failed to create backup: {}", backup_path.display()))?;

    Ok(backup_path)
}

/// Writes `document` to `path` using atomic write.
///
/// Uses temp file + rename pattern; output is pretty-printed.
pub fn write_document(path: &Path, document: &Value) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    let content = serde_json::to_string_pretty(document).context("Failed to serialize JSON")?;

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Loads, backs up, merges and writes in one step.
///
/// A failed backup is logged and the write goes ahead without one.
pub fn assemble(
    path: &Path,
    layout: &CompiledLayout,
    options: &DocumentOptions,
    backup: bool,
) -> Result<WriteOutcome> {
    assemble_at(path, layout, options, backup, Local::now())
}

fn assemble_at(
    path: &Path,
    layout: &CompiledLayout,
    options: &DocumentOptions,
    backup: bool,
    now: DateTime<Local>,
) -> Result<WriteOutcome> {
    let existing = load_document(path)?;

    let backup = if backup && path.exists() {
        match backup_document(path, now) {
            Ok(backup_path) => Some(backup_path),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %format!("{err:#}"),
                    "backup failed, writing without backup"
                );
                None
            }
        }
    } else {
        None
    };

    let document = merge_layout(existing, layout, options);
    write_document(path, &document)?;
    info!(path = %path.display(), rules = layout.rules.len(), "wrote karabiner.json");

    Ok(WriteOutcome {
        path: path.to_path_buf(),
        backup,
    })
}
